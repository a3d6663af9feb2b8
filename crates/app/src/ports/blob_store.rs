//! Blob store port — namespaced key/value object storage.

use std::future::Future;

use awaybot_domain::error::BoxError;

/// Markers that backends put in their error text for a missing object.
const NOT_FOUND_MARKERS: &[&str] = &["blobnotfound", "nosuchkey", "not found"];

/// Errors returned by a [`BlobStore`].
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// No object exists under the requested key.
    #[error("object {key} not found")]
    NotFound { key: String },

    /// Any other backend failure.
    #[error(transparent)]
    Backend(BoxError),
}

impl BlobError {
    /// Classify a backend error for `key`.
    ///
    /// Backends only signal a missing object through their error text, so
    /// this is the one place that inspects it.
    pub fn from_backend(key: &str, err: impl Into<BoxError>) -> Self {
        let err = err.into();
        let text = err.to_string().to_ascii_lowercase();
        if NOT_FOUND_MARKERS.iter().any(|marker| text.contains(marker)) {
            Self::NotFound {
                key: key.to_string(),
            }
        } else {
            Self::Backend(err)
        }
    }
}

/// Object storage grouped into namespaces, with prefix enumeration.
pub trait BlobStore {
    /// List every key in `namespace` starting with `prefix`, in key order.
    fn list_objects(
        &self,
        namespace: &str,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, BlobError>> + Send;

    /// Read the bytes stored under `key`.
    fn get_object(
        &self,
        namespace: &str,
        key: &str,
    ) -> impl Future<Output = Result<Vec<u8>, BlobError>> + Send;

    /// Write `data` under `key`, replacing any existing object.
    fn put_object(
        &self,
        namespace: &str,
        key: &str,
        data: Vec<u8>,
    ) -> impl Future<Output = Result<(), BlobError>> + Send;
}
