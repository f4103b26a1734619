//! Content fingerprint for migration files.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a migration's text.
///
/// Printed next to reports and apply results so an operator can tell which
/// revision of a file was checked or submitted.
pub fn migration_checksum(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{:x}", digest)
}
