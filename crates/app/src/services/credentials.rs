//! Credential resolution for the presence service.
//!
//! With a secret store configured, the token is read from it under a
//! deadline and any failure is fatal for the request. Without one, the
//! token supplied by configuration is used instead.

use std::time::Duration;

use awaybot_domain::error::AwayError;

use crate::ports::SecretStore;

/// Settings for [`CredentialResolver`].
#[derive(Debug, Clone)]
pub struct CredentialSettings {
    /// Name of the secret holding the token.
    pub secret_name: String,
    /// Deadline for a single secret read.
    pub timeout: Duration,
    /// Token to use when no secret store is configured.
    pub fallback_token: Option<String>,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            secret_name: "slack-token".to_string(),
            timeout: Duration::from_secs(5),
            fallback_token: None,
        }
    }
}

/// Resolves the token used to act on the presence service.
pub struct CredentialResolver<S> {
    secret_store: Option<S>,
    settings: CredentialSettings,
}

impl<S: SecretStore> CredentialResolver<S> {
    pub fn new(secret_store: Option<S>, settings: CredentialSettings) -> Self {
        Self {
            secret_store,
            settings,
        }
    }

    /// Resolve the token for one request.
    ///
    /// # Errors
    ///
    /// Returns [`AwayError::CredentialUnavailable`] if the secret store fails
    /// or misses its deadline, or if there is no store and no fallback token.
    pub async fn resolve(&self) -> Result<String, AwayError> {
        let name = &self.settings.secret_name;
        let Some(store) = &self.secret_store else {
            tracing::info!("loading token from environment");
            return self
                .settings
                .fallback_token
                .clone()
                .filter(|token| !token.is_empty())
                .ok_or_else(|| AwayError::CredentialUnavailable {
                    reason: "no secret store configured and no fallback token set".to_string(),
                });
        };

        tracing::info!(secret = %name, "loading token from secret store");
        match tokio::time::timeout(self.settings.timeout, store.get_secret(name)).await {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(err)) => Err(AwayError::CredentialUnavailable {
                reason: format!("could not load {name} from secret store: {err}"),
            }),
            Err(_) => Err(AwayError::CredentialUnavailable {
                reason: format!(
                    "timed out after {}ms loading {name} from secret store",
                    self.settings.timeout.as_millis()
                ),
            }),
        }
    }
}
