//! Users command - account administration without going through HTTP.

use std::sync::Arc;

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::domain::{User, UserResponse};
use crate::errors::AppResult;
use crate::infra::{Database, Repository, SeaRepository};
use crate::services::{AuthService, Authenticator};
use crate::types::PaginationParams;

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    let users = Arc::new(SeaRepository::<User>::new(db.get_connection()));

    match args.action {
        UsersAction::Add {
            email,
            username,
            password,
        } => {
            let auth = Authenticator::from_config(users, &config);
            let user = auth.register(email, username, password).await?;
            println!("Created user {} <{}> ({})", user.username, user.email, user.id);
        }
        UsersAction::List { page, per_page } => {
            let page = users.get_paged(&PaginationParams::new(page, per_page)).await?;

            for user in page.data.into_iter().map(UserResponse::from) {
                println!("{}  {:<24} {}", user.id, user.username, user.email);
            }
            println!(
                "page {}/{} ({} users)",
                page.meta.page, page.meta.total_pages, page.meta.total
            );
        }
    }

    Ok(())
}
