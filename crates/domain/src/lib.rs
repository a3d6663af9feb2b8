//! # awaybot-domain
//!
//! Pure domain model for awaybot, a status-trigger service.
//!
//! ## Responsibilities
//! - Parse **duration literals** (`15m`, `2h`, `2d`, `1w`) into minutes
//! - Parse **trigger definitions** (`vacation = I'm on a boat! (⛵️) DND for 1w`)
//!   into [`ActionTemplate`](template::ActionTemplate)s
//! - Define the **Action** applied to the presence service and its listing form
//! - Define the **error taxonomy** returned by every operation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod action;
pub mod definition;
pub mod duration;
pub mod payload;
pub mod presence;
pub mod template;
