//! Content checksums for scaffold change detection

use std::fmt;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// SHA256 checksum of file content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Checksum of a file on disk, or `None` if it cannot be read
    pub fn of_file(path: &Path) -> Option<Self> {
        fs::read(path).ok().map(|data| Self::from_bytes(&data))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Does `content` hash to this checksum?
    pub fn matches(&self, content: &[u8]) -> bool {
        *self == Self::from_bytes(content)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
