//! Content digest engine.
//!
//! A `ContentDigest` is the SHA-256 of a document's raw bytes. It is the
//! anchor of the whole proof scheme:
//! - deterministic: identical bytes always hash to the same digest
//! - collision-resistant: distinct documents never share a digest in practice
//! - pure: no side effects, no clock, no ambient state
//!
//! A read failure surfaces as `DigestUnavailable`; a placeholder digest is
//! never returned in its place.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::errors::{VaultError, VaultResult};

const READ_CHUNK: usize = 64 * 1024;

/// A 256-bit content digest, rendered as 64 lowercase hex characters
/// without a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, no `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash a byte slice. Pure function of the input.
pub fn digest_bytes(bytes: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    ContentDigest(hasher.finalize().into())
}

/// Hash everything a reader yields, streaming in fixed-size chunks so
/// arbitrarily large inputs never need to be resident at once.
pub fn digest_reader<R: Read>(mut reader: R) -> VaultResult<ContentDigest> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| VaultError::digest_unavailable(format!("read failed: {e}")))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(ContentDigest(hasher.finalize().into()))
}

/// Hash a file's contents.
pub fn digest_file<P: AsRef<Path>>(path: P) -> VaultResult<ContentDigest> {
    let file = File::open(path.as_ref()).map_err(|e| {
        VaultError::digest_unavailable(format!("cannot open {}: {e}", path.as_ref().display()))
    })?;
    digest_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn empty_input_matches_known_value() {
        assert_eq!(digest_bytes(b"").to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn digest_is_deterministic() {
        let a = digest_bytes(b"diploma bytes");
        let b = digest_bytes(b"diploma bytes");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_inputs_diverge() {
        assert_ne!(digest_bytes(b"a"), digest_bytes(b"b"));
    }

    #[test]
    fn reader_agrees_with_slice() {
        let data = vec![7u8; 200_000];
        let from_reader = digest_reader(&data[..]).unwrap();
        assert_eq!(from_reader, digest_bytes(&data));
    }

    #[test]
    fn failing_reader_surfaces_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }
        let err = digest_reader(Broken).unwrap_err();
        assert!(matches!(err, VaultError::DigestUnavailable(_)));
    }

    #[test]
    fn missing_file_surfaces_error() {
        let err = digest_file("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, VaultError::DigestUnavailable(_)));
    }
}
