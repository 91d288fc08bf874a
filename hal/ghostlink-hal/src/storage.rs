//! Payload storage abstractions
//!
//! Read-only access to stored payload scripts. Entries live under a single
//! fixed root and are identified by name. Implementations may sit on a
//! filesystem, an SD card or a flash key-value store.

use heapless::{String, Vec};

/// Maximum entry name length in bytes
pub const MAX_NAME_LEN: usize = 64;

/// Maximum number of entries returned by one listing
pub const MAX_ENTRIES: usize = 32;

/// Name of a stored payload, relative to the store root
pub type EntryName = String<MAX_NAME_LEN>;

/// Errors from payload storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying medium failed
    Io,
    /// No entry with that name
    NotFound,
    /// Name escapes the store root or is otherwise unusable
    InvalidName,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Store root missing or not readable
    Unavailable,
}

/// Read-only payload storage
pub trait PayloadStore {
    /// List entry names under the store root, sorted
    ///
    /// At most [`MAX_ENTRIES`] names are returned.
    fn entries(&mut self) -> Result<Vec<EntryName, MAX_ENTRIES>, StorageError>;

    /// Size of an entry in bytes
    fn size(&mut self, name: &str) -> Result<usize, StorageError>;

    /// Read an entry into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or an error if the buffer is too small.
    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;
}

/// Check that a name stays inside the store root
///
/// Rejects empty names, absolute paths and any `..` component.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return false;
    }
    if name.starts_with('/') || name.starts_with('\\') {
        return false;
    }
    !name.split(['/', '\\']).any(|part| part == ".." || part.is_empty())
}
