// src/stream.rs
//! The open-file handle at the center of the crate
//!
//! A [`FileStream`] pairs an optionally open descriptor with the path it
//! was opened from. The descriptor is exclusively owned: it is released on
//! [`FileStream::close`] or on drop, and `close` is safe to call twice.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{FileError, Result};

/// One OS file plus the path it was opened from.
///
/// The path and the descriptor have independent lifetimes: the path is
/// remembered across `close` so the digest and cipher passes can re-open
/// the same file through their own handles.
#[derive(Debug, Default)]
pub struct FileStream {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl FileStream {
    /// A closed stream with no path association.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` with an fopen-style mode string.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self> {
        let mut stream = Self::new();
        stream.reopen(path, mode)?;
        Ok(stream)
    }

    /// Open (or re-open) this stream on `path`, closing any current
    /// descriptor first and remembering the new path.
    pub fn reopen<P: AsRef<Path>>(&mut self, path: P, mode: &str) -> Result<()> {
        self.close();
        let file = open_options(mode).open(path.as_ref())?;
        debug!("opened {} with mode {:?}", path.as_ref().display(), mode);
        self.path = Some(path.as_ref().to_path_buf());
        self.file = Some(file);
        Ok(())
    }

    /// Whether this stream currently holds an open descriptor.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// The remembered path, if one was ever associated.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Release the descriptor. Safe to call on an already-closed stream;
    /// the path association survives.
    pub fn close(&mut self) {
        self.file = None;
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(FileError::NotOpen)
    }

    /// Raw read at the current position. Returns the number of bytes the
    /// OS delivered, which may be less than `buf.len()`.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file_mut()?.read(buf)?)
    }

    /// Raw write at the current position. Returns the number of bytes
    /// actually written; the caller is responsible for checking it.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(self.file_mut()?.write(buf)?)
    }

    /// Write all of `buf` or fail.
    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        Ok(self.file_mut()?.write_all(buf)?)
    }

    /// Reposition the stream and return the new offset.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        Ok(self.file_mut()?.seek(pos)?)
    }

    /// Current offset from the start of the file.
    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.file_mut()?.stream_position()?)
    }

    /// Advance the position by `n` bytes relative to the current offset
    /// and return the new position.
    pub fn skip(&mut self, n: i64) -> Result<u64> {
        Ok(self.file_mut()?.seek(SeekFrom::Current(n))?)
    }
}

/// Map an fopen-style mode string onto `OpenOptions`.
///
/// Unrecognized strings fall back to `"w"` semantics (create + truncate)
/// rather than failing; callers must not rely on invalid-mode detection.
fn open_options(mode: &str) -> OpenOptions {
    let mut opts = OpenOptions::new();
    match mode {
        "r" => opts.read(true),
        "w" => opts.write(true).create(true).truncate(true),
        "a" => opts.append(true).create(true),
        "r+" => opts.read(true).write(true),
        "w+" => opts.read(true).write(true).create(true).truncate(true),
        "a+" => opts.read(true).append(true).create(true),
        _ => opts.write(true).create(true).truncate(true),
    };
    opts
}
