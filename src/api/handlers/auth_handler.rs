//! Authentication handlers.

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::{LoginCommand, LoginResult};
use crate::types::{ApiResponse, Created};

/// User registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// User login request.
///
/// Carries no rules: malformed or empty credentials simply fail to match.
#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<LoginRequest> for LoginCommand {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Create authentication routes; `/me` sits behind the bearer middleware.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .merge(protected)
}

/// Login and get JWT token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResult>>> {
    let response = state.login.handle(payload.into()).await?;
    Ok(Json(response))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .register(payload.email, payload.username, payload.password)
        .await?;

    Ok(Created(UserResponse::from(user)))
}

/// Identity carried by the caller's token
pub async fn me(Extension(user): Extension<CurrentUser>) -> Json<ApiResponse<CurrentUser>> {
    Json(ApiResponse::success(user))
}
