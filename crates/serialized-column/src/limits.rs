//! Size limits applied while decoding untrusted payloads.

/// Maximum decoded payload size accepted from storage (64 MiB).
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;
