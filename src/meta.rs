// src/meta.rs
//! Stat-based metadata queries
//!
//! Thin pass-throughs to the OS. The digest and cipher passes only need
//! [`exists`] before opening a source path; the rest are conveniences in
//! the same shape.

use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Whether `path` names an existing file or directory.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Size of the file at `path` in bytes.
pub fn size<P: AsRef<Path>>(path: P) -> Result<u64> {
    Ok(fs::metadata(path.as_ref())?.len())
}

/// Permission bits of `path`, masked to the user/group/other rwx classes.
#[cfg(unix)]
pub fn permissions<P: AsRef<Path>>(path: P) -> Result<u32> {
    Ok(fs::metadata(path.as_ref())?.permissions().mode() & 0o777)
}

/// Whether any read bit is set on `path`.
#[cfg(unix)]
pub fn is_readable<P: AsRef<Path>>(path: P) -> bool {
    has_bits(path, 0o444)
}

/// Whether any write bit is set on `path`.
#[cfg(unix)]
pub fn is_writable<P: AsRef<Path>>(path: P) -> bool {
    has_bits(path, 0o222)
}

/// Whether any execute bit is set on `path`.
#[cfg(unix)]
pub fn is_executable<P: AsRef<Path>>(path: P) -> bool {
    has_bits(path, 0o111)
}

#[cfg(unix)]
fn has_bits<P: AsRef<Path>>(path: P, mask: u32) -> bool {
    permissions(path).map(|bits| bits & mask != 0).unwrap_or(false)
}
