//! Presence port — the remote service holding presence, status and DND.

use std::future::Future;

use awaybot_domain::duration::Minutes;
use awaybot_domain::presence::Presence;

/// Opaque failure reported by the presence service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

/// Current do-not-disturb state of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DndState {
    pub snooze_enabled: bool,
}

/// Calls against the remote presence/status service, acting as one user.
///
/// Presence, status and DND are independent fields on the remote side.
pub trait PresenceService {
    fn set_presence(
        &self,
        presence: Presence,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Set the status line. A zero `duration` means it never expires.
    fn set_status(
        &self,
        text: &str,
        emoji: &str,
        duration: Minutes,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;

    fn get_dnd_state(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<DndState, ServiceError>> + Send;

    fn end_snooze(&self) -> impl Future<Output = Result<(), ServiceError>> + Send;

    /// Start a snooze. A zero `duration` leaves the length to the service.
    fn set_snooze(
        &self,
        duration: Minutes,
    ) -> impl Future<Output = Result<(), ServiceError>> + Send;
}

/// Builds a [`PresenceService`] client for a resolved credential.
pub trait PresenceConnector {
    type Service: PresenceService;

    fn connect(&self, token: String) -> Self::Service;
}
