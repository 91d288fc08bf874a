//! Payload files on disk
//!
//! Payloads are plain files directly under one root directory. Nested
//! directories are not listed.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use ghostlink_hal::storage::{is_valid_name, MAX_ENTRIES};
use ghostlink_hal::{EntryName, PayloadStore, StorageError};
use log::{debug, warn};

/// Default payload directory
pub const DEFAULT_ROOT: &str = "payloads";

/// Payload store over a directory
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_name(name) {
            return Err(StorageError::InvalidName);
        }
        Ok(self.root.join(name))
    }
}

fn map_io(e: io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io,
    }
}

impl PayloadStore for DirStore {
    fn entries(&mut self) -> Result<heapless::Vec<EntryName, MAX_ENTRIES>, StorageError> {
        let dir = fs::read_dir(&self.root).map_err(|e| {
            debug!("payload root {}: {}", self.root.display(), e);
            StorageError::Unavailable
        })?;

        let mut names: Vec<String> = dir
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_valid_name(name) && !name.starts_with('.'))
            .collect();
        names.sort();

        if names.len() > MAX_ENTRIES {
            warn!("{} payloads found, listing the first {}", names.len(), MAX_ENTRIES);
        }

        let mut entries = heapless::Vec::new();
        for name in names.iter().take(MAX_ENTRIES) {
            let name = EntryName::try_from(name.as_str()).map_err(|_| StorageError::InvalidName)?;
            // Cannot fail: at most MAX_ENTRIES names
            let _ = entries.push(name);
        }
        Ok(entries)
    }

    fn size(&mut self, name: &str) -> Result<usize, StorageError> {
        let meta = fs::metadata(self.path(name)?).map_err(map_io)?;
        Ok(meta.len() as usize)
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let mut file = fs::File::open(self.path(name)?).map_err(map_io)?;
        let mut len = 0;
        loop {
            if len == buffer.len() {
                // Full buffer: only fine if the file ends here
                let mut probe = [0u8; 1];
                return match file.read(&mut probe).map_err(map_io)? {
                    0 => Ok(len),
                    _ => Err(StorageError::BufferTooSmall),
                };
            }
            match file.read(&mut buffer[len..]) {
                Ok(0) => return Ok(len),
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(map_io(e)),
            }
        }
    }
}
