use std::collections::{BTreeMap, HashSet};

use colored::Colorize;
use serde::Serialize;
use treeline_repo::{Commit, ContentHasher, HashAlgorithm, ObjectId, ObjectStore, Repo};

use crate::cli::*;
use crate::script::Script;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Demo => cmd_demo(cli.algorithm, cli.format),
        Command::Hash(args) => cmd_hash(args, cli.algorithm, cli.format),
        Command::Run(args) => cmd_run(args, cli.algorithm, cli.format),
    }
}

/// One commit as printed by `run` and `demo`.
#[derive(Debug, Serialize)]
struct CommitReport {
    id: String,
    tree: String,
    author: String,
    message: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<BTreeMap<String, String>>,
}

fn commit_report(repo: &Repo, commit: &Commit, show: bool) -> anyhow::Result<CommitReport> {
    let files = if show {
        let contents = repo.commit_contents(commit)?;
        Some(
            contents
                .walk_files()
                .into_iter()
                .map(|(path, data)| (path, String::from_utf8_lossy(data).into_owned()))
                .collect(),
        )
    } else {
        None
    };
    Ok(CommitReport {
        id: commit.id().to_hex(),
        tree: commit.tree_id().to_hex(),
        author: commit.author().to_string(),
        message: commit.message().to_string(),
        timestamp: commit.timestamp().canonical(),
        files,
    })
}

fn print_reports(reports: &[CommitReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            for report in reports {
                println!("{} {}", "commit".yellow(), report.id.yellow().bold());
                println!("Author: {}", report.author);
                println!("Date:   {}", report.timestamp);
                println!("Tree:   {}", report.tree.dimmed());
                println!("\n    {}\n", report.message);
                if let Some(files) = &report.files {
                    for (path, content) in files {
                        println!("File {}:", path.cyan());
                        println!("{content}");
                    }
                    println!();
                }
            }
        }
    }
    Ok(())
}

/// Commits matching the optional author and message filters, in history
/// order. Both filters must match when both are given.
fn select_commits<'a>(
    repo: &'a Repo,
    author: Option<&str>,
    grep: Option<&str>,
) -> Vec<&'a Commit> {
    let mut commits = match author {
        Some(author) => repo.search_commits_by_author(author),
        None => repo.history().collect(),
    };
    if let Some(text) = grep {
        let hits: HashSet<&ObjectId> = repo
            .search_commits_by_message(text)
            .into_iter()
            .map(Commit::id)
            .collect();
        commits.retain(|c| hits.contains(c.id()));
    }
    commits
}

fn build_demo(hasher: ContentHasher) -> anyhow::Result<(Repo, Vec<Commit>)> {
    let mut repo = Repo::with_hasher(hasher);
    let tree = repo.working_tree_mut();
    tree.add_file("a/b/c.txt", "meow")?;
    tree.add_file("a/a.txt", "meow")?;
    tree.add_file("meow.txt", "meow meow")?;
    let first = repo.commit("vanutp", "test commit")?;
    repo.working_tree_mut().add_file("meow.txt", "changed meow")?;
    let second = repo.commit("vanutp", "commit 2")?;
    Ok((repo, vec![first, second]))
}

fn cmd_demo(algorithm: Option<HashAlgorithm>, format: OutputFormat) -> anyhow::Result<()> {
    let (repo, commits) = build_demo(algorithm.unwrap_or_default().into())?;
    let reports = commits
        .iter()
        .map(|c| commit_report(&repo, c, true))
        .collect::<anyhow::Result<Vec<_>>>()?;
    print_reports(&reports, format)
}

fn cmd_hash(
    args: HashArgs,
    algorithm: Option<HashAlgorithm>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let hasher = ContentHasher::new(algorithm.unwrap_or_default());
    let digest = hasher.hash_str(&args.text).to_hex();
    match format {
        OutputFormat::Text => println!("{digest}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "algorithm": hasher.algorithm().name(), "digest": digest })
        ),
    }
    Ok(())
}

fn run_script(script: &Script, algorithm: Option<HashAlgorithm>) -> anyhow::Result<Repo> {
    let mut config = script.repo.clone().unwrap_or_default();
    if let Some(algorithm) = algorithm {
        config.hash_algorithm = algorithm;
    }
    let mut repo = Repo::from_config(&config);
    script.apply(&mut repo)?;
    Ok(repo)
}

fn cmd_run(
    args: RunArgs,
    algorithm: Option<HashAlgorithm>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let script = Script::load(&args.script)?;
    let repo = run_script(&script, algorithm)?;
    let reports = select_commits(&repo, args.author.as_deref(), args.grep.as_deref())
        .into_iter()
        .map(|c| commit_report(&repo, c, args.show))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if format == OutputFormat::Text {
        println!(
            "{} {} commits, {} objects\n",
            "✓".green().bold(),
            repo.history().count(),
            repo.objects().len()?
        );
    }
    print_reports(&reports, format)
}
