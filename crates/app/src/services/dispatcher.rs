//! Action dispatcher — applies an [`Action`] to the presence service.
//!
//! Steps run in order (presence, status, DND) and stop at the first failure.
//! Steps already applied are not rolled back.

use awaybot_domain::action::Action;
use awaybot_domain::error::{AwayError, DndChange};
use awaybot_domain::payload::Payload;

use crate::ports::PresenceService;

/// Applies actions through a [`PresenceService`] acting as one user.
pub struct ActionDispatcher<S> {
    service: S,
}

impl<S: PresenceService> ActionDispatcher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Set presence, then status, then reconcile do-not-disturb.
    ///
    /// Turning DND off first checks whether a snooze is active, so clearing
    /// an already-clear user is not an error. Turning it on is unconditional.
    ///
    /// # Errors
    ///
    /// Returns the [`AwayError`] variant naming the step that failed:
    /// `PresenceUpdateFailed`, `StatusUpdateFailed`, `DndQueryFailed` or
    /// `DndUpdateFailed`.
    #[tracing::instrument(
        skip(self, payload, action),
        fields(user_id = %payload.user_id, presence = %action.presence, dnd = action.dnd)
    )]
    pub async fn apply_action(&self, payload: &Payload, action: &Action) -> Result<(), AwayError> {
        self.service
            .set_presence(action.presence)
            .await
            .map_err(|err| AwayError::PresenceUpdateFailed(err.into()))?;

        self.service
            .set_status(&action.status_text, &action.status_emoji, action.duration)
            .await
            .map_err(|err| AwayError::StatusUpdateFailed(err.into()))?;

        if action.dnd {
            self.service
                .set_snooze(action.duration)
                .await
                .map_err(|err| AwayError::DndUpdateFailed {
                    change: DndChange::Set,
                    source: err.into(),
                })?;
            return Ok(());
        }

        let state = self
            .service
            .get_dnd_state(&payload.user_id)
            .await
            .map_err(|err| AwayError::DndQueryFailed(err.into()))?;
        if state.snooze_enabled {
            self.service
                .end_snooze()
                .await
                .map_err(|err| AwayError::DndUpdateFailed {
                    change: DndChange::End,
                    source: err.into(),
                })?;
        } else {
            tracing::debug!("no active snooze to end");
        }
        Ok(())
    }
}
