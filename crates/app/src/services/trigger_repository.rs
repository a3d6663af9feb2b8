//! Trigger repository — per-user template storage on top of a [`BlobStore`].
//!
//! Templates live in the `triggers` namespace under `<user_id>/<name>`, so a
//! user's triggers share the `<user_id>/` prefix.

use awaybot_domain::error::AwayError;
use awaybot_domain::template::ActionTemplate;

use crate::ports::{BlobError, BlobStore};

/// Namespace holding every stored trigger.
pub const TRIGGERS_NAMESPACE: &str = "triggers";

/// Stores and loads [`ActionTemplate`]s keyed by owner and name.
pub struct TriggerRepository<B> {
    store: B,
}

impl<B: BlobStore> TriggerRepository<B> {
    /// Create a repository backed by the given blob store.
    pub fn new(store: B) -> Self {
        Self { store }
    }

    fn key(user_id: &str, name: &str) -> String {
        format!("{user_id}/{name}")
    }

    fn prefix(user_id: &str) -> String {
        format!("{user_id}/")
    }

    /// Persist `template` for `user_id`, replacing a trigger with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`AwayError::StoreUnavailable`] if the record cannot be
    /// encoded or written.
    #[tracing::instrument(skip(self, template), fields(trigger = %template.name))]
    pub async fn store(&self, user_id: &str, template: &ActionTemplate) -> Result<(), AwayError> {
        let key = Self::key(user_id, &template.name);
        let payload = serde_json::to_vec(template).map_err(|err| AwayError::StoreUnavailable {
            operation: "encode",
            key: key.clone(),
            source: err.into(),
        })?;
        self.store
            .put_object(TRIGGERS_NAMESPACE, &key, payload)
            .await
            .map_err(|err| store_error("write", &key, err))?;
        tracing::debug!(%key, "stored trigger");
        Ok(())
    }

    /// Load the trigger `name` owned by `user_id`.
    ///
    /// # Errors
    ///
    /// - [`AwayError::TriggerNotFound`] when nothing is stored under the key,
    ///   or `name` is not a valid trigger name.
    /// - [`AwayError::CorruptTrigger`] when the stored record does not decode.
    /// - [`AwayError::StoreUnavailable`] for any other storage failure.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, user_id: &str, name: &str) -> Result<ActionTemplate, AwayError> {
        let not_found = || AwayError::TriggerNotFound {
            name: name.to_string(),
        };
        if !ActionTemplate::is_valid_name(name) {
            return Err(not_found());
        }

        let key = Self::key(user_id, name);
        let payload = match self.store.get_object(TRIGGERS_NAMESPACE, &key).await {
            Ok(payload) => payload,
            Err(BlobError::NotFound { .. }) => return Err(not_found()),
            Err(err) => return Err(store_error("read", &key, err)),
        };

        serde_json::from_slice(&payload).map_err(|err| AwayError::CorruptTrigger {
            name: name.to_string(),
            payload: String::from_utf8_lossy(&payload).into_owned(),
            source: err.into(),
        })
    }

    /// Names of every trigger owned by `user_id`, in store enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`AwayError::StoreUnavailable`] if enumeration fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_names(&self, user_id: &str) -> Result<Vec<String>, AwayError> {
        let prefix = Self::prefix(user_id);
        let keys = self
            .store
            .list_objects(TRIGGERS_NAMESPACE, &prefix)
            .await
            .map_err(|err| store_error("list", &prefix, err))?;

        Ok(keys
            .into_iter()
            .map(|key| match key.strip_prefix(&prefix) {
                Some(name) => name.to_string(),
                None => key,
            })
            .collect())
    }
}

fn store_error(operation: &'static str, key: &str, err: BlobError) -> AwayError {
    AwayError::StoreUnavailable {
        operation,
        key: key.to_string(),
        source: err.into(),
    }
}
