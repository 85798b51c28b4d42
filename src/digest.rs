// src/digest.rs
//! Whole-file digests, streamed in bounded chunks
//!
//! Each invocation opens its own read-only handle, so hashing never
//! disturbs the position of any stream the caller already holds on the
//! same path. Another handle can still truncate the file mid-hash at the
//! OS level; serializing access to a path is the caller's job.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::consts::DIGEST_CHUNK_LEN;
use crate::error::{FileError, Result};
use crate::stream::FileStream;

/// Supported whole-file hash algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DigestAlg {
    Sha1,
    Sha256,
    Md5,
}

impl DigestAlg {
    /// Digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            DigestAlg::Sha1 => 20,
            DigestAlg::Sha256 => 32,
            DigestAlg::Md5 => 16,
        }
    }
}

/// Hashing state for one pipeline run.
enum DigestState {
    Sha1(Sha1),
    Sha256(Sha256),
    Md5(Md5),
}

impl DigestState {
    fn new(alg: DigestAlg) -> Self {
        match alg {
            DigestAlg::Sha1 => DigestState::Sha1(Sha1::new()),
            DigestAlg::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestAlg::Md5 => DigestState::Md5(Md5::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Sha1(h) => h.update(data),
            DigestState::Sha256(h) => h.update(data),
            DigestState::Md5(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Sha1(h) => h.finalize().to_vec(),
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Md5(h) => h.finalize().to_vec(),
        }
    }
}

/// Hash the file at `path`, reading it in 16 KiB chunks.
///
/// The returned digest is exactly `alg.output_len()` bytes. Nothing is
/// returned on failure; the handle and hashing state are released on
/// every exit path.
pub fn hash_file<P: AsRef<Path>>(path: P, alg: DigestAlg) -> Result<Vec<u8>> {
    let mut file = File::open(path.as_ref())?;
    let mut state = DigestState::new(alg);
    let mut chunk = [0u8; DIGEST_CHUNK_LEN];
    let mut total = 0u64;
    loop {
        let got = file.read(&mut chunk)?;
        if got == 0 {
            break;
        }
        state.update(&chunk[..got]);
        total += got as u64;
    }
    debug!("hashed {} bytes of {}", total, path.as_ref().display());
    Ok(state.finalize())
}

/// Hash the file at `path` and return the digest as lowercase hex.
pub fn hash_file_hex<P: AsRef<Path>>(path: P, alg: DigestAlg) -> Result<String> {
    Ok(hex::encode(hash_file(path, alg)?))
}

impl FileStream {
    /// Hash the remembered file through an independent read-only handle.
    ///
    /// Fails with [`FileError::NoPath`] before touching the OS when no
    /// path was ever associated. The stream's own position is untouched.
    pub fn digest(&self, alg: DigestAlg) -> Result<Vec<u8>> {
        let path = self.path().ok_or(FileError::NoPath)?;
        hash_file(path, alg)
    }
}
