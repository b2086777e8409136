//! Content fingerprints for memo keys.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 (hex) of the JSON form of a node's declared inputs.
///
/// Equal inputs give equal fingerprints; a memo node recomputes only when the
/// fingerprint of its inputs changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint any serializable value.
    pub fn of<T: Serialize + ?Sized>(inputs: &T) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(inputs)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(Self(hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex digits, for log lines.
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
