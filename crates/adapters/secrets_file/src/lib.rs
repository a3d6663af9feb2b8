//! # awaybot-adapter-secrets-file
//!
//! Reads secrets mounted as files, one secret per file named after it
//! (e.g. `/run/secrets/slack-token`).
//!
//! ## Dependency rule
//! Depends on `awaybot-app` (for port traits) only.

use std::path::PathBuf;

use awaybot_app::ports::{SecretError, SecretStore};

/// Secret store over a directory of secret files.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Names map straight to file names, so anything that could leave `dir` is refused.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl SecretStore for FileSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        let not_found = || SecretError::NotFound {
            name: name.to_string(),
        };
        if !is_plain_name(name) {
            return Err(not_found());
        }

        match tokio::fs::read_to_string(self.dir.join(name)).await {
            Ok(content) => {
                let secret = content.trim();
                if secret.is_empty() {
                    Err(not_found())
                } else {
                    Ok(secret.to_string())
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(err) => Err(SecretError::Backend(Box::new(err))),
        }
    }
}
