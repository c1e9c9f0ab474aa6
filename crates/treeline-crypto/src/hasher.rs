use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use sha2::Sha256;
use treeline_types::ObjectId;

/// Digest algorithm backing a [`ContentHasher`].
///
/// `Sha1` is the default for compatibility with the historical object
/// format. It is collision-susceptible; pick `Sha256` or `Blake3` when ids
/// must resist deliberate collisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 160-bit SHA-1.
    #[default]
    Sha1,
    /// 256-bit SHA-256.
    Sha256,
    /// 256-bit BLAKE3.
    Blake3,
}

impl HashAlgorithm {
    /// Output width in bytes.
    pub const fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 | Self::Blake3 => 32,
        }
    }

    /// Lowercase algorithm name, as used in configuration files.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HasherError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Deterministic content hasher.
///
/// Same input, same output, no side effects. Composite hashes (trees,
/// commits) are built by concatenating the [`ContentHasher::hash_hex`] form
/// of their fields; because every digest from one hasher has the same hex
/// width, the concatenation has no ambiguous field boundaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentHasher {
    algorithm: HashAlgorithm,
}

impl ContentHasher {
    /// SHA-1 hasher.
    pub const SHA1: Self = Self::new(HashAlgorithm::Sha1);
    /// SHA-256 hasher.
    pub const SHA256: Self = Self::new(HashAlgorithm::Sha256);
    /// BLAKE3 hasher.
    pub const BLAKE3: Self = Self::new(HashAlgorithm::Blake3);

    /// Create a hasher for the given algorithm.
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The algorithm this hasher uses.
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Output width in bytes.
    pub const fn digest_len(&self) -> usize {
        self.algorithm.digest_len()
    }

    /// Hash raw bytes.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        let digest = match self.algorithm {
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };
        ObjectId::from_digest(digest)
    }

    /// Hash the UTF-8 bytes of a string.
    pub fn hash_str(&self, s: &str) -> ObjectId {
        self.hash(s.as_bytes())
    }

    /// Hash raw bytes and return the lowercase hex encoding.
    pub fn hash_hex(&self, data: &[u8]) -> String {
        self.hash(data).to_hex()
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(&self, data: &[u8], expected: &ObjectId) -> bool {
        self.hash(data) == *expected
    }
}

impl From<HashAlgorithm> for ContentHasher {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self::new(algorithm)
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
