//! Digests of decoded text.
//!
//! A digest lets two decode runs be compared without diffing the text,
//! e.g. to confirm a re-run reproduced the same output byte for byte.

use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// BLAKE3 - fast, default.
    #[default]
    Blake3,
    /// SHA-256 - for tooling that expects it.
    Sha256,
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!("unknown digest algorithm {:?}", other)),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DigestAlgorithm::Blake3 => "blake3",
            DigestAlgorithm::Sha256 => "sha256",
        })
    }
}

/// 32-byte digest of a decoded text.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextDigest {
    algorithm: DigestAlgorithm,
    data: [u8; 32],
}

impl TextDigest {
    /// Hashes `text` with `algorithm`.
    pub fn compute(algorithm: DigestAlgorithm, text: &str) -> Self {
        let data = match algorithm {
            DigestAlgorithm::Blake3 => {
                let mut hasher = Blake3Hasher::new();
                hasher.update(text.as_bytes());
                *hasher.finalize().as_bytes()
            }
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(text.as_bytes());
                let result = hasher.finalize();
                let mut data = [0u8; 32];
                data.copy_from_slice(&result);
                data
            }
        };
        Self { algorithm, data }
    }

    #[inline]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.data
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        self.data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for TextDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextDigest({}:{})", self.algorithm, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        let digest = TextDigest::compute(DigestAlgorithm::Sha256, "abc");
        assert_eq!(
            digest.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_blake3_matches_crate() {
        let digest = TextDigest::compute(DigestAlgorithm::Blake3, "hidden");
        assert_eq!(digest.as_bytes(), blake3::hash(b"hidden").as_bytes());
        assert_eq!(digest.to_hex().len(), 64);
    }

    #[test]
    fn test_different_text_different_digest() {
        let a = TextDigest::compute(DigestAlgorithm::default(), "flag{a}");
        let b = TextDigest::compute(DigestAlgorithm::default(), "flag{b}");
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("SHA256".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Sha256));
        assert_eq!("blake3".parse::<DigestAlgorithm>(), Ok(DigestAlgorithm::Blake3));
        assert!("md5".parse::<DigestAlgorithm>().is_err());
    }
}
