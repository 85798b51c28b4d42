// src/lib.rs
//! binfile — typed binary file I/O with whole-file digest and cipher passes
//!
//! Features:
//! - fopen-style mode strings over one exclusively owned descriptor
//! - native-endian scalar and length-prefixed string framing
//! - streaming SHA-1 / SHA-256 / MD5 file digests
//! - streaming AES-128-ECB file transforms

pub mod cipher;
pub mod codec;
pub mod consts;
pub mod digest;
pub mod error;
pub mod meta;
pub mod stream;

// Re-export everything users need at the crate root
pub use cipher::{decrypt_file, encrypt_file, generate_key, transform_file, Direction};
pub use codec::Scalar;
pub use digest::{hash_file, hash_file_hex, DigestAlg};
pub use error::{FileError, Result};
pub use stream::FileStream;
