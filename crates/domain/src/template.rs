//! Action templates — named, storable triggers and their listing form.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// A named [`Action`] owned by a user within a team.
///
/// Names are unique per user; the repository key enforces it, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTemplate {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "TeamId")]
    pub team_id: String,
    #[serde(flatten)]
    pub action: Action,
}

impl ActionTemplate {
    /// Attach the owning team.
    #[must_use]
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = team_id.into();
        self
    }

    /// Whether `name` is usable as a trigger name (ASCII letters, digits, `_`, `-`).
    #[must_use]
    pub fn is_valid_name(name: &str) -> bool {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("name pattern is valid"))
            .is_match(name)
    }
}

/// Listing form: `name = text (emoji) DND for 2h0m0s`.
///
/// Parens are only written for a non-empty emoji, so a template stored with
/// an empty emoji renders to a line the grammar would not accept.
impl fmt::Display for ActionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.action.status_text)?;
        if !self.action.status_emoji.is_empty() {
            write!(f, " ({})", self.action.status_emoji)?;
        }
        if self.action.dnd {
            f.write_str(" DND")?;
        }
        if !self.action.duration.is_zero() {
            write!(f, " for {}", self.action.duration)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::Minutes;
    use crate::presence::Presence;

    fn template(text: &str, emoji: &str, dnd: bool, minutes: u64) -> ActionTemplate {
        ActionTemplate {
            name: "vacation".to_string(),
            team_id: "T1".to_string(),
            action: Action {
                presence: Presence::Away,
                status_text: text.to_string(),
                status_emoji: emoji.to_string(),
                dnd,
                duration: Minutes::new(minutes),
            },
        }
    }

    #[test]
    fn should_render_every_field() {
        let t = template("I'm on a boat!", "⛵️", true, 10080);
        assert_eq!(t.to_string(), "vacation = I'm on a boat! (⛵️) DND for 168h0m0s");
    }

    #[test]
    fn should_omit_parens_when_emoji_is_empty() {
        let t = template("heads down", "", false, 0);
        assert_eq!(t.to_string(), "vacation = heads down");
    }

    #[test]
    fn should_render_emoji_only_template() {
        let t = template("", "🎯", false, 0);
        assert_eq!(t.to_string(), "vacation =  (🎯)");
    }

    #[test]
    fn should_render_duration_without_dnd() {
        let t = template("lunch", ":pizza:", false, 45);
        assert_eq!(t.to_string(), "vacation = lunch (:pizza:) for 45m0s");
    }

    #[test]
    fn should_validate_names() {
        assert!(ActionTemplate::is_valid_name("focus"));
        assert!(ActionTemplate::is_valid_name("deep-work_2"));
        assert!(!ActionTemplate::is_valid_name(""));
        assert!(!ActionTemplate::is_valid_name("a/b"));
        assert!(!ActionTemplate::is_valid_name("../other"));
        assert!(!ActionTemplate::is_valid_name("two words"));
        assert!(!ActionTemplate::is_valid_name("café"));
        assert!(!ActionTemplate::is_valid_name("１"));
    }

    #[test]
    fn should_serialize_flat_record() {
        let value = serde_json::to_value(template("lunch", ":pizza:", true, 60)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "vacation",
                "teamId": "T1",
                "presence": "away",
                "statusText": "lunch",
                "statusEmoji": ":pizza:",
                "dnd": true,
                "durationMinutes": 60
            })
        );
    }

    #[test]
    fn should_read_legacy_pascal_case_record() {
        let json = r#"{"Name":"gym","TeamId":"T9","Presence":"away","StatusText":"lifting","StatusEmoji":"muscle","DnD":true,"Duration":90}"#;
        let t: ActionTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.name, "gym");
        assert_eq!(t.team_id, "T9");
        assert_eq!(t.action.status_text, "lifting");
        assert_eq!(t.action.status_emoji, "muscle");
        assert!(t.action.dnd);
        assert_eq!(t.action.duration, Minutes::new(90));
    }

    #[test]
    fn should_roundtrip_record_through_serde_json() {
        let t = template("", "🎯", false, 0);
        let bytes = serde_json::to_vec(&t).unwrap();
        let parsed: ActionTemplate = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, t);
    }
}
