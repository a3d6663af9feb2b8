//! # awaybot-adapter-slack
//!
//! Slack Web API adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement `PresenceConnector` / `PresenceService` from `awaybot-app::ports::presence`
//! - Map presence, status and snooze calls onto `users.*` and `dnd.*` methods
//! - Turn `"ok": false` envelopes into opaque service errors
//!
//! ## Dependency rule
//! Depends on `awaybot-app` (for port traits) and `awaybot-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod client;
mod error;

pub use client::{DEFAULT_API_URL, SlackClient, SlackConfig, SlackConnector};
pub use error::SlackError;
