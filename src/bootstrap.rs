use anyhow::{Context, Result};
use sea_orm::ConnectionTrait;

use crate::config::APP_CONFIG;
use crate::entities::user;
use crate::repositories::UserRepository;

/// Creates the configured administrator account unless a user with that
/// username already exists.
pub async fn initialize_admin_user<C: ConnectionTrait>(db: &C) -> Result<()> {
    ensure_admin_user(
        db,
        &APP_CONFIG.admin_username,
        &APP_CONFIG.admin_email,
        &APP_CONFIG.admin_password,
    )
    .await
    .map(|_| ())
}

/// Returns the created user, or `None` when the username is already taken.
pub async fn ensure_admin_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    email: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let user_repo = UserRepository::new(db);

    let existing_admin = user_repo
        .find_by_username(username)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(None);
    }

    tracing::info!("Creating default admin user...");

    let hashed_password =
        bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash admin password")?;

    let admin = user_repo
        .create(username.to_string(), email.to_string(), hashed_password, true)
        .await
        .context("Failed to insert admin user")?;

    tracing::info!(username = %admin.username, email = %admin.email, "Admin user created");
    tracing::warn!("Please change the default admin password after first login");

    Ok(Some(admin))
}
