//! SHA-256 checksum utility for migration integrity checks.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 checksum of a migration's script fragments.
///
/// Each fragment has CRLF line endings folded to LF and surrounding
/// whitespace trimmed before it is fed to the hasher. Fragments are
/// concatenated without a delimiter, so only the pair as a whole is
/// fingerprinted. The digest is rendered as lowercase hex.
pub fn compute_checksum<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut hasher = Sha256::new();
    for fragment in fragments {
        let normalized = fragment.as_ref().replace("\r\n", "\n");
        hasher.update(normalized.trim().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
