//! Body serialization capability.
//!
//! `ApiClient` never calls `serde_json` directly; it goes through a `Codec`
//! so the wire format can be swapped without touching the pipeline.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// A body could not be encoded or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

pub trait Codec: Send + Sync {
    /// `Content-Type` attached to encoded request bodies.
    fn content_type(&self) -> &'static str;

    fn encode<S: Serialize + ?Sized>(&self, value: &S) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<S: Serialize + ?Sized>(&self, value: &S) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError(e.to_string()))
    }
}
