//! Presence — whether the user shows as active or away.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two presence states the remote service understands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Presence follows activity. Older records store this as `"auto"`.
    #[serde(alias = "auto")]
    Active,
    /// Forced away. Every parsed trigger uses this state.
    #[default]
    Away,
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Away => f.write_str("away"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_as_lowercase_names() {
        assert_eq!(serde_json::to_string(&Presence::Away).unwrap(), "\"away\"");
        assert_eq!(
            serde_json::to_string(&Presence::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn should_accept_legacy_auto_value() {
        let p: Presence = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(p, Presence::Active);
    }

    #[test]
    fn should_reject_unknown_presence() {
        assert!(serde_json::from_str::<Presence>("\"busy\"").is_err());
    }
}
