//! Action — the status state applied to the remote presence service.

use serde::{Deserialize, Serialize};

use crate::duration::Minutes;
use crate::presence::Presence;

/// A resolved status: presence, status line, do-not-disturb and expiry.
///
/// `dnd` with a zero `duration` means do-not-disturb without a specified
/// length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(alias = "Presence")]
    pub presence: Presence,
    #[serde(default, alias = "StatusText")]
    pub status_text: String,
    #[serde(default, alias = "StatusEmoji")]
    pub status_emoji: String,
    #[serde(default, alias = "DnD")]
    pub dnd: bool,
    #[serde(default, rename = "durationMinutes", alias = "Duration")]
    pub duration: Minutes,
}

impl Action {
    /// The clear-status action: active, no status line, no do-not-disturb.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            presence: Presence::Active,
            ..Self::default()
        }
    }
}
