//! Content fingerprints for extracted modules

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Fingerprint of a declaration source, stable across runs.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{}", PREFIX, hex::encode(hasher.finalize()))
}
