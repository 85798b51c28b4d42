// src/codec.rs
//! Typed binary values over a [`FileStream`]
//!
//! Scalars are fixed-width and native-endian (the codec does not
//! normalize byte order across hosts). Strings are framed as a `u32`
//! byte length followed by the raw payload, with no terminator and no
//! alignment padding; field ordering is entirely the caller's call order.

use crate::error::{FileError, Result};
use crate::stream::FileStream;

/// A fixed-width value the codec knows how to frame.
pub trait Scalar: Copy + Default {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Decode from exactly [`Self::WIDTH`] native-endian bytes.
    fn decode(buf: &[u8]) -> Self;

    /// Encode into exactly [`Self::WIDTH`] native-endian bytes.
    fn encode(self, buf: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn decode(buf: &[u8]) -> Self {
                <$ty>::from_ne_bytes(buf.try_into().expect("buffer is sliced to WIDTH"))
            }

            fn encode(self, buf: &mut [u8]) {
                buf.copy_from_slice(&self.to_ne_bytes());
            }
        }
    )*};
}

impl_scalar!(i8, u8, i32, u32, i64, u64);

impl Scalar for bool {
    const WIDTH: usize = 1;

    fn decode(buf: &[u8]) -> Self {
        buf[0] != 0
    }

    fn encode(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }
}

impl FileStream {
    /// Read one scalar, failing loudly on a short read.
    ///
    /// Exactly [`Scalar::WIDTH`] bytes are requested in a single raw read;
    /// anything less, including a clean end of stream, is
    /// [`FileError::UnexpectedEof`].
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        let mut buf = [0u8; 8];
        let got = self.read(&mut buf[..T::WIDTH])?;
        if got != T::WIDTH {
            return Err(FileError::UnexpectedEof {
                wanted: T::WIDTH,
                got,
            });
        }
        Ok(T::decode(&buf[..T::WIDTH]))
    }

    /// Read one scalar, mapping every failure — end of stream, short read,
    /// even a closed stream — to the type's zero/false value.
    ///
    /// Callers that need to tell a genuine zero from a missing value use
    /// [`FileStream::read_scalar`] instead.
    pub fn read_scalar_or_default<T: Scalar>(&mut self) -> T {
        self.read_scalar().unwrap_or_default()
    }

    /// Write one scalar in full.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        let mut buf = [0u8; 8];
        value.encode(&mut buf[..T::WIDTH]);
        self.write_all(&buf[..T::WIDTH])
    }

    /// Read a length-prefixed byte string.
    ///
    /// The `u32` length is read strictly; a zero length returns an empty
    /// vector without touching the stream again. The payload read stops at
    /// end of stream, and the result is truncated to the bytes actually
    /// obtained — a short payload is not an error.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_scalar::<u32>()? as usize;
        if len == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let got = self.read(&mut buf[filled..])?;
            if got == 0 {
                break;
            }
            filled += got;
        }
        buf.truncate(filled);
        Ok(buf)
    }

    /// Read a length-prefixed string and validate it as UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        Ok(String::from_utf8(self.read_bytes()?)?)
    }

    /// Write a length-prefixed byte string: `u32` length, then the raw
    /// bytes, nothing else.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len())
            .map_err(|_| FileError::OversizedPayload(data.len()))?;
        self.write_scalar(len)?;
        self.write_all(data)
    }

    /// Write a length-prefixed string.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }
}
