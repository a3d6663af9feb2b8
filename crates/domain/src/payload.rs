//! Payload — who is asking, carried by every produced operation.

use serde::{Deserialize, Serialize};

/// Requesting user and team, as supplied by the inbound command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub user_id: String,
    pub user_name: String,
    pub team_id: String,
    pub team_name: String,
}

impl Payload {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        team_id: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            team_id: team_id.into(),
            team_name: team_name.into(),
        }
    }
}
