//! zstd-compressing coder for binary columns.
//!
//! Wraps another coder and stores its payload as a single zstd frame. The
//! frame is the whole stored value; no header is added around it.

use std::io::Read;

use tracing::debug;

use crate::coder::{Coder, ObjectClass, ValidateValue};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_PAYLOAD_SIZE;
use crate::payload::Payload;

/// zstd level used by [`ZstdCoder::new`].
pub const DEFAULT_LEVEL: i32 = 3;

/// Compresses the payloads of an inner coder.
///
/// Always dumps [`Payload::Binary`]; pair it with a binary column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZstdCoder<C> {
    inner: C,
    level: i32,
}

impl<C> ZstdCoder<C> {
    /// Wraps `inner` at [`DEFAULT_LEVEL`].
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            level: DEFAULT_LEVEL,
        }
    }

    /// Sets the compression level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Returns the wrapped coder.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Returns the compression level.
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl<C: Coder> Coder for ZstdCoder<C> {
    type Value = C::Value;

    fn load(&self, raw: Option<&Payload>) -> Result<C::Value, DecodeError> {
        match raw {
            Some(payload) if !payload.is_empty() => {
                let body = decompress(payload.as_bytes())?;
                self.inner.load(Some(&Payload::Binary(body)))
            }
            _ => self.inner.load(None),
        }
    }

    fn dump(&self, value: &C::Value) -> Result<Option<Payload>, EncodeError> {
        let Some(payload) = self.inner.dump(value)? else {
            return Ok(None);
        };
        let body = payload.as_bytes();
        let compressed = ::zstd::encode_all(body, self.level)
            .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;
        debug!(
            uncompressed = body.len(),
            compressed = compressed.len(),
            level = self.level,
            "compressed payload"
        );
        Ok(Some(Payload::Binary(compressed)))
    }

    fn is_nil(&self, value: &C::Value) -> bool {
        self.inner.is_nil(value)
    }

    fn validator(&self) -> Option<&dyn ValidateValue<C::Value>> {
        self.inner.validator()
    }

    fn object_class(&self) -> Option<ObjectClass<C::Value>> {
        self.inner.object_class()
    }
}

/// Decompresses one zstd frame, reading at most one byte past the size limit.
fn decompress(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let decoder = ::zstd::Decoder::new(data)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    let mut decompressed = Vec::new();
    decoder
        .take(MAX_PAYLOAD_SIZE as u64 + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() > MAX_PAYLOAD_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "payload",
            len: decompressed.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::coder::{JsonCoder, StoreCoder, TypedJsonCoder};

    fn large_document() -> Value {
        let tags: Vec<String> = (0..50).map(|i| format!("tag-{i}")).collect();
        json!({ "tags": tags, "theme": "dark" })
    }

    #[test]
    fn test_compressed_roundtrip() {
        let coder = ZstdCoder::new(JsonCoder);
        let doc = large_document();
        let payload = coder.dump(&doc).unwrap().unwrap();
        assert!(payload.is_binary());
        assert!(payload.len() < serde_json::to_string(&doc).unwrap().len());
        assert_eq!(coder.load(Some(&payload)).unwrap(), doc);
    }

    #[test]
    fn test_payload_is_bare_frame() {
        let coder = ZstdCoder::new(JsonCoder).with_level(1);
        assert_eq!(coder.level(), 1);
        let payload = coder.dump(&json!({"a": 1})).unwrap().unwrap();
        let plain = ::zstd::decode_all(payload.as_bytes()).unwrap();
        assert_eq!(plain, br#"{"a":1}"#.to_vec());
    }

    #[test]
    fn test_absent_defers_to_inner() {
        let coder = ZstdCoder::new(StoreCoder::json());
        assert_eq!(coder.load(None).unwrap(), json!({}));
        assert_eq!(coder.load(Some(&Payload::binary(Vec::new()))).unwrap(), json!({}));
    }

    #[test]
    fn test_not_a_frame() {
        let coder = ZstdCoder::new(JsonCoder);
        let result = coder.load(Some(&Payload::binary(br#"{"a":1}"#.to_vec())));
        assert!(matches!(result, Err(DecodeError::DecompressionFailed(_))));
    }

    #[test]
    fn test_truncated_frame() {
        let coder = ZstdCoder::new(JsonCoder);
        let payload = coder.dump(&large_document()).unwrap().unwrap();
        let cut = Payload::binary(payload.as_bytes()[..payload.len() / 2].to_vec());
        assert!(matches!(
            coder.load(Some(&cut)),
            Err(DecodeError::DecompressionFailed(_))
        ));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let zeros = vec![0u8; MAX_PAYLOAD_SIZE + 1];
        let compressed = ::zstd::encode_all(&zeros[..], 1).unwrap();
        let result = decompress(&compressed);
        assert_eq!(
            result,
            Err(DecodeError::LengthExceedsLimit {
                field: "payload",
                len: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE,
            })
        );
    }

    #[test]
    fn test_forwards_capabilities() {
        let coder = ZstdCoder::new(TypedJsonCoder::<Vec<u8>>::new());
        assert!(coder.object_class().is_some());
        assert!(ZstdCoder::new(JsonCoder).validator().is_none());
        assert!(ZstdCoder::new(JsonCoder).is_nil(&Value::Null));
    }
}
