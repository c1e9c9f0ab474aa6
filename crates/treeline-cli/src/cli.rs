use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use treeline_repo::HashAlgorithm;

#[derive(Parser)]
#[command(
    name = "treeline",
    about = "Treeline: content-addressed snapshots of an in-memory file tree",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Digest algorithm (sha1, sha256, blake3); overrides any script config
    #[arg(long, global = true)]
    pub algorithm: Option<HashAlgorithm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a small tree, commit it twice and print both snapshots
    Demo,
    /// Print the digest of a string
    Hash(HashArgs),
    /// Replay a TOML script of working-tree edits and commits
    Run(RunArgs),
}

#[derive(Args)]
pub struct HashArgs {
    pub text: String,
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Print the reconstructed contents of every listed commit
    #[arg(long)]
    pub show: bool,
    /// Only list commits by this exact author
    #[arg(long)]
    pub author: Option<String>,
    /// Only list commits whose message contains this text (any case)
    #[arg(long)]
    pub grep: Option<String>,
}
