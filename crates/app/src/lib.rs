//! # awaybot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BlobStore` — namespaced object storage with prefix listing
//!   - `PresenceService` / `PresenceConnector` — remote presence, status and DND
//!   - `SecretStore` — named credentials
//! - Define **driving/inbound ports** as use-case structs:
//!   - `StatusService` — clear status, list, trigger and create triggers
//!   - `TriggerRepository` — per-user template storage
//!   - `ActionDispatcher` — ordered presence/status/DND updates
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `awaybot-domain` only (plus `tokio::time` for deadlines).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
