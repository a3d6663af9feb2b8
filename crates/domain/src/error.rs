//! Error taxonomy shared across the workspace.
//!
//! Parsing errors ([`DurationError`], [`DefinitionError`]) are user-facing and
//! echo the offending input. [`AwayError`] is the single failure type returned
//! by every produced operation; each variant is terminal for the request.

/// Boxed source error from an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A duration literal could not be converted to minutes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    /// Neither the day/week shorthand nor the general literal parser accepted the input.
    #[error("invalid duration {literal:?}")]
    InvalidDuration { literal: String },
}

/// A trigger definition line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// The line does not match the trigger grammar.
    #[error(
        "Invalid trigger definition {definition:?}. Try /create-trigger vacation = I'm on a boat! (⛵️) DND for 1w"
    )]
    InvalidDefinition { definition: String },

    /// The line matched but its `for <duration>` suffix did not parse.
    #[error("invalid duration in trigger definition {literal:?}, here are some examples: 15m, 1h, 2d, 1w")]
    InvalidDurationLiteral { literal: String },
}

/// Top-level failure of a status operation.
#[derive(Debug, thiserror::Error)]
pub enum AwayError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("trigger {name} not registered")]
    TriggerNotFound { name: String },

    #[error("error decoding trigger {name}: {payload}")]
    CorruptTrigger {
        name: String,
        payload: String,
        #[source]
        source: BoxError,
    },

    #[error("could not set presence: {0}")]
    PresenceUpdateFailed(#[source] BoxError),

    #[error("could not set status: {0}")]
    StatusUpdateFailed(#[source] BoxError),

    #[error("could not retrieve user's current DND state: {0}")]
    DndQueryFailed(#[source] BoxError),

    #[error("could not {change} do not disturb: {source}")]
    DndUpdateFailed {
        change: DndChange,
        #[source]
        source: BoxError,
    },

    #[error("could not load credential: {reason}")]
    CredentialUnavailable { reason: String },

    #[error("storage unavailable while trying to {operation} {key}: {source}")]
    StoreUnavailable {
        operation: &'static str,
        key: String,
        #[source]
        source: BoxError,
    },
}

/// Which do-not-disturb update failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DndChange {
    End,
    Set,
}

impl std::fmt::Display for DndChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::End => f.write_str("end"),
            Self::Set => f.write_str("set"),
        }
    }
}
