//! Secret store port — named credentials.

use std::future::Future;

use awaybot_domain::error::BoxError;

/// Errors returned by a [`SecretStore`].
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("secret {name} not found")]
    NotFound { name: String },

    #[error(transparent)]
    Backend(BoxError),
}

/// Read-only access to named secrets.
pub trait SecretStore {
    fn get_secret(&self, name: &str) -> impl Future<Output = Result<String, SecretError>> + Send;
}
