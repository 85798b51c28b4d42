// src/cipher.rs
//! File-to-file AES-128-ECB transforms, streamed in bounded chunks
//!
//! The block mode is deliberately non-chaining and takes no IV, for
//! compatibility with ciphertext produced under this contract: identical
//! plaintext blocks under the same key always yield identical ciphertext
//! blocks, so block-level repetition in the plaintext shows through.
//! Final-block padding is PKCS#7 — an exact-multiple input still gains a
//! full padding block.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Block};
use log::debug;

use crate::consts::{AES_BLOCK_LEN, AES_KEY_LEN, CIPHER_CHUNK_LEN};
use crate::error::{FileError, Result};
use crate::stream::FileStream;

/// Which way a transform runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Generate a random AES-128 key.
pub fn generate_key() -> [u8; AES_KEY_LEN] {
    rand::random()
}

/// Encrypt the file at `source` into `dest`.
pub fn encrypt_file<P: AsRef<Path>>(source: P, dest: P, key: &[u8; AES_KEY_LEN]) -> Result<()> {
    transform_file(source, dest, key, Direction::Encrypt)
}

/// Decrypt the file at `source` into `dest`.
pub fn decrypt_file<P: AsRef<Path>>(source: P, dest: P, key: &[u8; AES_KEY_LEN]) -> Result<()> {
    transform_file(source, dest, key, Direction::Decrypt)
}

/// Run one whole-file transform.
///
/// The source must open for reading before the destination is created;
/// a failed run after that point may leave a partial destination file
/// behind (best-effort output, no cleanup pass).
pub fn transform_file<P: AsRef<Path>>(
    source: P,
    dest: P,
    key: &[u8; AES_KEY_LEN],
    direction: Direction,
) -> Result<()> {
    let mut reader = File::open(source.as_ref())?;
    let mut writer = File::create(dest.as_ref())?;
    let cipher = Aes128::new(key.into());
    debug!(
        "{:?} {} -> {}",
        direction,
        source.as_ref().display(),
        dest.as_ref().display()
    );
    match direction {
        Direction::Encrypt => encrypt_stream(&mut reader, &mut writer, &cipher),
        Direction::Decrypt => decrypt_stream(&mut reader, &mut writer, &cipher),
    }
}

impl FileStream {
    /// Transform the remembered file into `dest` through an independent
    /// read-only handle. Fails with [`FileError::NoPath`] before touching
    /// the OS when no path was ever associated.
    pub fn transform_to<P: AsRef<Path>>(
        &self,
        dest: P,
        key: &[u8; AES_KEY_LEN],
        direction: Direction,
    ) -> Result<()> {
        let source = self.path().ok_or(FileError::NoPath)?;
        transform_file(source, dest.as_ref(), key, direction)
    }

    /// Encrypt the remembered file into `dest`.
    pub fn encrypt_to<P: AsRef<Path>>(&self, dest: P, key: &[u8; AES_KEY_LEN]) -> Result<()> {
        self.transform_to(dest, key, Direction::Encrypt)
    }

    /// Decrypt the remembered file into `dest`.
    pub fn decrypt_to<P: AsRef<Path>>(&self, dest: P, key: &[u8; AES_KEY_LEN]) -> Result<()> {
        self.transform_to(dest, key, Direction::Decrypt)
    }
}

fn encrypt_stream<R, W>(source: &mut R, dest: &mut W, cipher: &Aes128) -> Result<()>
where
    R: Read,
    W: Write,
{
    // one block of slack for the padding appended to the final chunk
    let mut chunk = [0u8; CIPHER_CHUNK_LEN + AES_BLOCK_LEN];
    loop {
        let filled = read_chunk(source, &mut chunk[..CIPHER_CHUNK_LEN])?;
        let at_end = filled < CIPHER_CHUNK_LEN;
        let total = if at_end {
            // PKCS#7: always pad, with a whole block when the input
            // divides evenly
            let pad = AES_BLOCK_LEN - filled % AES_BLOCK_LEN;
            chunk[filled..filled + pad].fill(pad as u8);
            filled + pad
        } else {
            filled
        };
        for block in chunk[..total].chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.encrypt_block(Block::from_mut_slice(block));
        }
        dest.write_all(&chunk[..total])?;
        if at_end {
            return Ok(());
        }
    }
}

fn decrypt_stream<R, W>(source: &mut R, dest: &mut W, cipher: &Aes128) -> Result<()>
where
    R: Read,
    W: Write,
{
    let mut chunk = [0u8; CIPHER_CHUNK_LEN];
    // the final plaintext block is withheld until end of input so its
    // padding can be stripped
    let mut held: Option<[u8; AES_BLOCK_LEN]> = None;
    let mut consumed = 0u64;
    loop {
        let filled = read_chunk(source, &mut chunk)?;
        if filled == 0 {
            break;
        }
        consumed += filled as u64;
        // read_chunk only comes up short at end of input, so a ragged
        // chunk means the whole ciphertext is misaligned
        if filled % AES_BLOCK_LEN != 0 {
            return Err(FileError::BlockMisaligned(consumed));
        }
        if let Some(block) = held.take() {
            dest.write_all(&block)?;
        }
        for block in chunk[..filled].chunks_exact_mut(AES_BLOCK_LEN) {
            cipher.decrypt_block(Block::from_mut_slice(block));
        }
        let last = filled - AES_BLOCK_LEN;
        dest.write_all(&chunk[..last])?;
        let mut tail = [0u8; AES_BLOCK_LEN];
        tail.copy_from_slice(&chunk[last..filled]);
        held = Some(tail);
    }

    let tail = held.ok_or(FileError::EmptyCiphertext)?;
    let pad = tail[AES_BLOCK_LEN - 1] as usize;
    if pad == 0
        || pad > AES_BLOCK_LEN
        || tail[AES_BLOCK_LEN - pad..].iter().any(|&b| b != pad as u8)
    {
        return Err(FileError::InvalidPadding);
    }
    dest.write_all(&tail[..AES_BLOCK_LEN - pad])?;
    Ok(())
}

/// Fill `buf` from `source`, stopping early only at end of input.
fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let got = source.read(&mut buf[filled..])?;
        if got == 0 {
            break;
        }
        filled += got;
    }
    Ok(filled)
}
