//! Login, registration and logout on top of [`MoodApi`] and a [`SessionStore`].

use thiserror::Error;

use super::MoodApi;
use crate::error::MoodError;
use crate::model::User;
use crate::session::SessionStore;

pub const LOGIN_FAILED: &str = "Login failed!";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const REGISTER_SUCCEEDED: &str = "Registration succeeded, please log in";
pub const REGISTER_FAILED: &str = "Registration failed";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Any login failure. The cause is logged, never shown.
    #[error("Login failed!")]
    InvalidCredentials,

    #[error("All fields are required")]
    MissingFields,

    #[error("{0}")]
    RegistrationFailed(String),

    /// Login succeeded but the session could not be saved.
    #[error("could not save session: {0}")]
    Session(#[source] MoodError),
}

/// Log in and persist token and user together. Returns the stored user.
pub async fn login<A: MoodApi>(
    api: &A,
    store: &dyn SessionStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let resp = api.login(email.trim(), password).await.map_err(|e| {
        tracing::warn!(email = email.trim(), "login failed: {e}");
        AuthError::InvalidCredentials
    })?;
    if resp.token.is_empty() {
        tracing::warn!("login response carried an empty token");
        return Err(AuthError::InvalidCredentials);
    }

    store
        .set(&resp.token, &resp.user)
        .map_err(AuthError::Session)?;
    tracing::info!(user = resp.user.display_name(), "logged in");
    Ok(resp.user)
}

/// Create an account. Does not log in; on success returns the message to show.
pub async fn register<A: MoodApi>(
    api: &A,
    name: &str,
    email: &str,
    password: &str,
) -> Result<&'static str, AuthError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingFields);
    }

    match api.register(name, email, password).await {
        Ok(_) => {
            tracing::info!(email, "registered");
            Ok(REGISTER_SUCCEEDED)
        }
        Err(e) => {
            tracing::warn!(email, "registration failed: {e}");
            Err(AuthError::RegistrationFailed(e.user_message(REGISTER_FAILED)))
        }
    }
}

/// Remove token and user.
pub fn logout(store: &dyn SessionStore) -> crate::error::Result<()> {
    store.clear()?;
    tracing::info!("logged out");
    Ok(())
}
