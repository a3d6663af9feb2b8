//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod credentials;
pub mod dispatcher;
pub mod status_service;
pub mod trigger_repository;
