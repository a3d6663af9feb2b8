//! Status service — the four operations exposed to inbound commands.
//!
//! Each operation runs to completion for one requester and either succeeds or
//! returns a single [`AwayError`] suitable for display.

use awaybot_domain::action::Action;
use awaybot_domain::definition::parse_template;
use awaybot_domain::error::AwayError;
use awaybot_domain::payload::Payload;
use awaybot_domain::template::ActionTemplate;

use crate::ports::{BlobStore, PresenceConnector, SecretStore};
use crate::services::credentials::CredentialResolver;
use crate::services::dispatcher::ActionDispatcher;
use crate::services::trigger_repository::TriggerRepository;

/// Application service for clearing, listing, firing and creating triggers.
pub struct StatusService<B, C, S> {
    triggers: TriggerRepository<B>,
    connector: C,
    credentials: CredentialResolver<S>,
}

impl<B, C, S> StatusService<B, C, S>
where
    B: BlobStore,
    C: PresenceConnector,
    S: SecretStore,
{
    pub fn new(
        triggers: TriggerRepository<B>,
        connector: C,
        credentials: CredentialResolver<S>,
    ) -> Self {
        Self {
            triggers,
            connector,
            credentials,
        }
    }

    /// Reset the requester to active with no status and no snooze.
    ///
    /// # Errors
    ///
    /// Returns credential or presence-service failures.
    #[tracing::instrument(skip_all, fields(user_id = %payload.user_id, team_id = %payload.team_id))]
    pub async fn clear_status(&self, payload: &Payload) -> Result<(), AwayError> {
        tracing::info!(
            user_name = %payload.user_name,
            team_name = %payload.team_name,
            "clearing status"
        );
        self.dispatch(payload, &Action::clear()).await
    }

    /// Render every trigger owned by the requester, one per line.
    ///
    /// Fails as a whole if any single trigger cannot be loaded.
    ///
    /// # Errors
    ///
    /// Returns storage failures, including a trigger deleted between listing
    /// and loading ([`AwayError::TriggerNotFound`]).
    #[tracing::instrument(skip_all, fields(user_id = %payload.user_id, team_id = %payload.team_id))]
    pub async fn list_triggers(&self, payload: &Payload) -> Result<String, AwayError> {
        tracing::info!(
            user_name = %payload.user_name,
            team_name = %payload.team_name,
            "listing triggers"
        );
        let names = self.triggers.list_names(&payload.user_id).await?;
        let mut lines = Vec::with_capacity(names.len());
        for name in &names {
            let template = self.triggers.fetch(&payload.user_id, name).await?;
            lines.push(template.to_string());
        }
        Ok(lines.join("\n"))
    }

    /// Apply the requester's trigger `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AwayError::TriggerNotFound`] for an unknown name, or
    /// credential and presence-service failures.
    #[tracing::instrument(
        skip_all,
        fields(user_id = %payload.user_id, team_id = %payload.team_id, trigger = %name)
    )]
    pub async fn trigger(&self, payload: &Payload, name: &str) -> Result<(), AwayError> {
        tracing::info!(
            user_name = %payload.user_name,
            team_name = %payload.team_name,
            "triggering"
        );
        let template = self.triggers.fetch(&payload.user_id, name).await?;
        self.dispatch(payload, &template.action).await
    }

    /// Parse `definition` and store it for the requester, replacing any
    /// trigger with the same name. Nothing is stored if parsing fails.
    ///
    /// # Errors
    ///
    /// Returns definition errors (echoing the input) or storage failures.
    #[tracing::instrument(skip_all, fields(user_id = %payload.user_id, team_id = %payload.team_id))]
    pub async fn create_trigger(
        &self,
        payload: &Payload,
        definition: &str,
    ) -> Result<ActionTemplate, AwayError> {
        tracing::info!(
            user_name = %payload.user_name,
            team_name = %payload.team_name,
            %definition,
            "creating trigger"
        );
        let template = parse_template(definition)?.with_team_id(payload.team_id.clone());
        self.triggers.store(&payload.user_id, &template).await?;
        Ok(template)
    }

    async fn dispatch(&self, payload: &Payload, action: &Action) -> Result<(), AwayError> {
        let token = self.credentials.resolve().await?;
        ActionDispatcher::new(self.connector.connect(token))
            .apply_action(payload, action)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{BlobError, DndState, PresenceService, SecretError, ServiceError};
    use crate::services::credentials::CredentialSettings;
    use awaybot_domain::duration::Minutes;
    use awaybot_domain::presence::Presence;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    // ── In-memory blob store ───────────────────────────────────────

    #[derive(Default)]
    struct InMemoryBlobStore {
        objects: Mutex<BTreeMap<String, Vec<u8>>>,
        /// Keys listed but missing on read, as if deleted concurrently.
        phantom_keys: Vec<String>,
    }

    impl BlobStore for InMemoryBlobStore {
        fn list_objects(
            &self,
            _namespace: &str,
            prefix: &str,
        ) -> impl Future<Output = Result<Vec<String>, BlobError>> + Send {
            let mut keys: Vec<String> = self
                .objects
                .lock()
                .unwrap()
                .keys()
                .chain(self.phantom_keys.iter())
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect();
            keys.sort();
            async move { Ok(keys) }
        }

        fn get_object(
            &self,
            _namespace: &str,
            key: &str,
        ) -> impl Future<Output = Result<Vec<u8>, BlobError>> + Send {
            let result = self.objects.lock().unwrap().get(key).cloned().ok_or_else(|| {
                BlobError::NotFound {
                    key: key.to_string(),
                }
            });
            async move { result }
        }

        fn put_object(
            &self,
            _namespace: &str,
            key: &str,
            data: Vec<u8>,
        ) -> impl Future<Output = Result<(), BlobError>> + Send {
            self.objects.lock().unwrap().insert(key.to_string(), data);
            async { Ok(()) }
        }
    }

    // ── Recording presence connector ───────────────────────────────

    #[derive(Clone, Default)]
    struct RecordingConnector {
        log: Arc<Mutex<Vec<String>>>,
    }

    struct RecordingClient {
        token: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingClient {
        fn push(&self, entry: String) -> impl Future<Output = Result<(), ServiceError>> + Send {
            self.log.lock().unwrap().push(format!("{}:{entry}", self.token));
            async { Ok(()) }
        }
    }

    impl PresenceConnector for RecordingConnector {
        type Service = RecordingClient;

        fn connect(&self, token: String) -> RecordingClient {
            RecordingClient {
                token,
                log: Arc::clone(&self.log),
            }
        }
    }

    impl PresenceService for RecordingClient {
        fn set_presence(
            &self,
            presence: Presence,
        ) -> impl Future<Output = Result<(), ServiceError>> + Send {
            self.push(format!("presence={presence}"))
        }

        fn set_status(
            &self,
            text: &str,
            emoji: &str,
            duration: Minutes,
        ) -> impl Future<Output = Result<(), ServiceError>> + Send {
            self.push(format!("status={text}|{emoji}|{}", duration.get()))
        }

        fn get_dnd_state(
            &self,
            _user_id: &str,
        ) -> impl Future<Output = Result<DndState, ServiceError>> + Send {
            async {
                Ok(DndState {
                    snooze_enabled: false,
                })
            }
        }

        fn end_snooze(&self) -> impl Future<Output = Result<(), ServiceError>> + Send {
            self.push("end_snooze".to_string())
        }

        fn set_snooze(
            &self,
            duration: Minutes,
        ) -> impl Future<Output = Result<(), ServiceError>> + Send {
            self.push(format!("snooze={}", duration.get()))
        }
    }

    struct NoSecrets;

    impl SecretStore for NoSecrets {
        fn get_secret(
            &self,
            name: &str,
        ) -> impl Future<Output = Result<String, SecretError>> + Send {
            let name = name.to_string();
            async move { Err(SecretError::NotFound { name }) }
        }
    }

    type Service = StatusService<InMemoryBlobStore, RecordingConnector, NoSecrets>;

    fn service_with(
        store: InMemoryBlobStore,
        token: Option<&str>,
    ) -> (Service, RecordingConnector) {
        let connector = RecordingConnector::default();
        let credentials = CredentialResolver::new(
            None,
            CredentialSettings {
                fallback_token: token.map(str::to_string),
                ..CredentialSettings::default()
            },
        );
        let service = StatusService::new(
            TriggerRepository::new(store),
            connector.clone(),
            credentials,
        );
        (service, connector)
    }

    fn service() -> (Service, RecordingConnector) {
        service_with(InMemoryBlobStore::default(), Some("xoxp-test"))
    }

    fn payload() -> Payload {
        Payload::new("U1", "ada", "T1", "acme")
    }

    #[tokio::test]
    async fn should_create_trigger_with_team_id() {
        let (svc, _) = service();
        let created = svc
            .create_trigger(&payload(), "vacation = I'm on a boat! (⛵️) DND for 1w")
            .await
            .unwrap();
        assert_eq!(created.team_id, "T1");
        assert_eq!(created.action.duration, Minutes::new(10080));

        let stored = svc.triggers.fetch("U1", "vacation").await.unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn should_store_nothing_when_definition_is_invalid() {
        let (svc, _) = service();
        let err = svc
            .create_trigger(&payload(), "bad input no parens")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad input no parens"));
        assert!(svc.triggers.list_names("U1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_rendered_triggers_one_per_line() {
        let (svc, _) = service();
        svc.create_trigger(&payload(), "lunch = out (🍕) for 1h").await.unwrap();
        svc.create_trigger(&payload(), "focus=(🎯) DND").await.unwrap();

        let listing = svc.list_triggers(&payload()).await.unwrap();
        assert_eq!(listing, "focus =  (🎯) DND\nlunch = out (🍕) for 1h0m0s");
    }

    #[tokio::test]
    async fn should_list_empty_text_without_triggers() {
        let (svc, _) = service();
        assert_eq!(svc.list_triggers(&payload()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn should_fail_whole_listing_when_one_trigger_vanished() {
        let store = InMemoryBlobStore {
            phantom_keys: vec!["U1/gone".to_string()],
            ..InMemoryBlobStore::default()
        };
        let (svc, _) = service_with(store, Some("xoxp-test"));
        svc.create_trigger(&payload(), "focus=(🎯)").await.unwrap();

        let err = svc.list_triggers(&payload()).await.unwrap_err();
        assert!(matches!(err, AwayError::TriggerNotFound { name } if name == "gone"));
    }

    #[tokio::test]
    async fn should_apply_stored_trigger_with_resolved_token() {
        let (svc, connector) = service();
        svc.create_trigger(&payload(), "meeting = in a call (📞) DND for 30m")
            .await
            .unwrap();

        svc.trigger(&payload(), "meeting").await.unwrap();
        assert_eq!(
            *connector.log.lock().unwrap(),
            vec![
                "xoxp-test:presence=away",
                "xoxp-test:status=in a call|📞|30",
                "xoxp-test:snooze=30",
            ]
        );
    }

    #[tokio::test]
    async fn should_not_touch_presence_for_unknown_trigger() {
        let (svc, connector) = service();
        let err = svc.trigger(&payload(), "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "trigger nope not registered");
        assert!(connector.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_clear_status_to_active() {
        let (svc, connector) = service();
        svc.clear_status(&payload()).await.unwrap();
        assert_eq!(
            *connector.log.lock().unwrap(),
            vec!["xoxp-test:presence=active", "xoxp-test:status=||0"]
        );
    }

    #[tokio::test]
    async fn should_fail_before_dispatch_without_credentials() {
        let (svc, connector) = service_with(InMemoryBlobStore::default(), None);
        let err = svc.clear_status(&payload()).await.unwrap_err();
        assert!(matches!(err, AwayError::CredentialUnavailable { .. }));
        assert!(connector.log.lock().unwrap().is_empty());
    }
}
