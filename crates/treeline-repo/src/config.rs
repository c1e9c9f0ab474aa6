use std::path::Path;

use serde::{Deserialize, Serialize};
use treeline_crypto::{ContentHasher, HashAlgorithm};

use crate::error::{RepoError, RepoResult};

/// Repository configuration.
///
/// Loaded from TOML; every key is optional:
///
/// ```toml
/// hash_algorithm = "sha256"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Digest used for every object id in the repository.
    pub hash_algorithm: HashAlgorithm,
}

impl RepoConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> RepoResult<Self> {
        toml::from_str(s).map_err(|e| RepoError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RepoError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> RepoResult<String> {
        toml::to_string(self).map_err(|e| RepoError::Config(e.to_string()))
    }

    /// The hasher this configuration selects.
    pub fn hasher(&self) -> ContentHasher {
        ContentHasher::new(self.hash_algorithm)
    }
}
