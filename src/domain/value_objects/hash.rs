//! Content Hash Value Object
//!
//! SHA-256 digest of a generated file's content, used by the reconcile
//! write policy to tell provisioner-written content from operator edits.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash with the `sha256:` prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a raw hash string, adding the prefix if missing
    pub fn new(raw_hash: &str) -> Self {
        if raw_hash.starts_with(Self::PREFIX) {
            Self(raw_hash.to_string())
        } else {
            Self(format!("{}{}", Self::PREFIX, raw_hash))
        }
    }

    /// Hash text content
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Hash raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex digest without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// Compare against a stored string, with or without prefix
    pub fn matches_str(&self, s: &str) -> bool {
        if s.starts_with(Self::PREFIX) {
            self.0 == s
        } else {
            self.hex() == s
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentHash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ContentHash {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}
