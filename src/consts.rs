// src/consts.rs
//! Shared constants — chunk sizes and cipher geometry

/// Chunk size for streaming file digests.
pub const DIGEST_CHUNK_LEN: usize = 16 * 1024;

/// Chunk size for streaming cipher transforms.
// Must stay a multiple of AES_BLOCK_LEN so only the final chunk pads
pub const CIPHER_CHUNK_LEN: usize = 1024;

/// AES block size in bytes.
pub const AES_BLOCK_LEN: usize = 16;

/// AES-128 key size in bytes.
pub const AES_KEY_LEN: usize = 16;
