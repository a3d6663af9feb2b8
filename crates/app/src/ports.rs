//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod blob_store;
pub mod presence;
pub mod secret_store;

pub use blob_store::{BlobError, BlobStore};
pub use presence::{DndState, PresenceConnector, PresenceService, ServiceError};
pub use secret_store::{SecretError, SecretStore};
