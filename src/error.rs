// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

/// The error type for all binfile operations.
///
/// Covers OS-level I/O failures, precondition failures (closed stream,
/// missing path association), codec framing errors, and cipher-stream
/// validation errors.
#[derive(Error, Debug)]
pub enum FileError {
    /// I/O error from the OS layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operation needs an open descriptor.
    #[error("stream is not open")]
    NotOpen,

    /// The operation needs a remembered path, and none was ever associated
    /// with this stream.
    #[error("no path is associated with this stream")]
    NoPath,

    /// A fixed-width read ended before the full value arrived.
    ///
    /// Distinguishes "the stream ended" from "read a genuine zero" — use
    /// the `_or_default` codec variant to collapse this back to zero.
    #[error("unexpected end of stream: wanted {wanted} bytes, got {got}")]
    UnexpectedEof { wanted: usize, got: usize },

    /// A length-prefixed payload held invalid UTF-8.
    #[error("string payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A payload too long for its u32 length prefix.
    #[error("payload of {0} bytes does not fit a u32 length prefix")]
    OversizedPayload(usize),

    /// Ciphertext did not divide into whole cipher blocks.
    #[error("ciphertext length {0} is not a multiple of the cipher block size")]
    BlockMisaligned(u64),

    /// Decrypt was handed a zero-length source; padded ciphertext is never
    /// empty.
    #[error("ciphertext is empty")]
    EmptyCiphertext,

    /// The final block's padding bytes were malformed.
    #[error("invalid padding in final cipher block")]
    InvalidPadding,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FileError>;
