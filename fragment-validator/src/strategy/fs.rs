//! Filesystem fragment source.
//!
//! Lists the direct entries of the fragment directory and reads them with a
//! bounded read. Properties enforced here:
//! - Only depth-1 entries are considered; subdirectories are never descended
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Entries are returned sorted by name so repeated runs report identically
//! - Reads stop at `max_file_size + 1` bytes, so an oversized file is detected
//!   without being loaded in full

use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DirSourceConfig;
use crate::error::FragmentIssue;

/// What kind of directory entry was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file (or a symlink to one, when links are followed).
    File,
    /// A directory, socket, fifo, or an unfollowed symlink.
    Other,
    /// The entry was listed but its metadata could not be read.
    Unreadable(String),
}

/// One direct entry of the fragment directory.
#[derive(Debug, Clone)]
pub struct FsEntry {
    /// File name, lossily decoded if it is not UTF-8.
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// List the direct entries of `config.dir`, sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory itself cannot be listed. Problems with
/// individual entries are returned as [`EntryKind::Unreadable`] instead.
pub fn list_entries(config: &DirSourceConfig) -> anyhow::Result<Vec<FsEntry>> {
    let mut entries = Vec::new();

    for entry_result in WalkDir::new(&config.dir)
        .follow_links(config.follow_links)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry_result {
            Ok(entry) => {
                let name = entry.file_name().to_string_lossy().into_owned();
                let kind = if entry.file_type().is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                entries.push(FsEntry {
                    name,
                    path: entry.into_path(),
                    kind,
                });
            }
            Err(walk_err) if walk_err.depth() == 0 => {
                anyhow::bail!(
                    "Failed to list fragment directory {}: {walk_err}",
                    config.dir.display()
                );
            }
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| config.dir.clone(), Path::to_path_buf);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                entries.push(FsEntry {
                    name,
                    path,
                    kind: EntryKind::Unreadable(format!("Directory traversal error: {walk_err}")),
                });
            }
        }
    }

    Ok(entries)
}

/// Read a file using a bounded streaming read.
///
/// At most `max_file_size + 1` bytes are read, so the caller can tell an
/// oversized file apart from one that is exactly at the limit. The handle is
/// dropped before returning on every path.
///
/// # Errors
///
/// Returns [`FragmentIssue::Io`] if the file cannot be opened or read.
pub fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<Vec<u8>, FragmentIssue> {
    let file = std::fs::File::open(path).map_err(|e| FragmentIssue::Io {
        message: format!("Failed to open file: {e}"),
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| FragmentIssue::Io {
            message: format!("Failed to read file: {e}"),
        })?;

    Ok(buffer)
}
