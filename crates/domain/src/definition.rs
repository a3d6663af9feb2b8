//! Trigger definitions — the one-line grammar users write.
//!
//! ```text
//! name "=" [status_text] "(" emoji ")" [" DND"] [" for " duration]
//! ```
//!
//! e.g. `vacation = I'm on a boat! (⛵️) DND for 1w`.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::action::Action;
use crate::duration::parse_duration;
use crate::error::DefinitionError;
use crate::presence::Presence;
use crate::template::ActionTemplate;

fn definition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Za-z0-9_-]+) ?=(?: ?(\S.*?))? *\(([^()]*)\)( DND)?(?: for ([0-9][0-9wdhms]*))?$",
        )
        .expect("definition pattern is valid")
    })
}

/// Parse a trigger definition into an away-state template.
///
/// The returned template has an empty `team_id`; callers attach it with
/// [`ActionTemplate::with_team_id`].
///
/// # Errors
///
/// - [`DefinitionError::InvalidDefinition`] if the whole line does not match.
/// - [`DefinitionError::InvalidDurationLiteral`] if the `for` suffix is not a
///   valid duration.
pub fn parse_template(definition: &str) -> Result<ActionTemplate, DefinitionError> {
    let caps = definition_re()
        .captures(definition)
        .ok_or_else(|| DefinitionError::InvalidDefinition {
            definition: definition.to_string(),
        })?;

    let literal = caps.get(5).map_or("", |m| m.as_str());
    let duration =
        parse_duration(literal).map_err(|_| DefinitionError::InvalidDurationLiteral {
            literal: literal.to_string(),
        })?;

    Ok(ActionTemplate {
        name: caps[1].to_string(),
        team_id: String::new(),
        action: Action {
            presence: Presence::Away,
            status_text: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            status_emoji: caps[3].to_string(),
            dnd: caps.get(4).is_some(),
            duration,
        },
    })
}

impl FromStr for ActionTemplate {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_template(s)
    }
}
