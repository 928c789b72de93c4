use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Uniform result envelope for every outward-facing outcome.
///
/// A successful envelope carries `data` (and optionally a `message`);
/// a failed one never carries `data` and always carries a `message`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_no_data() {
        let response = ApiResponse::<String>::fail("Invalid credentials");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_omits_empty_message() {
        let json = serde_json::to_value(ApiResponse::success(7)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 7);
        assert!(json.get("message").is_none());
    }
}
