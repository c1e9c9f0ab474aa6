//! TOML scripts for `treeline run`.
//!
//! ```toml
//! [repo]
//! hash_algorithm = "sha256"
//!
//! [[step]]
//! action = "add"
//! path = "docs/readme.txt"
//! content = "hello"
//!
//! [[step]]
//! action = "commit"
//! author = "alice"
//! message = "initial"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;
use treeline_repo::{Repo, RepoConfig};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub repo: Option<RepoConfig>,
    #[serde(default)]
    pub step: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Add { path: String, content: String },
    Remove { path: String },
    Clear,
    Commit { author: String, message: String },
}

impl Script {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// Apply every step, in order, to `repo`.
    pub fn apply(&self, repo: &mut Repo) -> anyhow::Result<()> {
        for (n, step) in self.step.iter().enumerate() {
            debug!(step = n + 1, ?step, "applying");
            match step {
                Step::Add { path, content } => repo
                    .working_tree_mut()
                    .add_file(path.as_str(), content.as_str())
                    .with_context(|| format!("step {}: add {path}", n + 1))?,
                Step::Remove { path } => {
                    repo.working_tree_mut()
                        .remove_file(path.as_str())
                        .with_context(|| format!("step {}: remove {path}", n + 1))?;
                }
                Step::Clear => repo.working_tree_mut().clear(),
                Step::Commit { author, message } => {
                    repo.commit(author.as_str(), message.as_str())
                        .with_context(|| format!("step {}: commit", n + 1))?;
                }
            }
        }
        Ok(())
    }
}
