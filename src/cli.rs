//! Command-line interface: argument parsing and the async entrypoint shared
//! by `main` and the integration tests.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::github::GitHubClient;
use crate::leetcode::LeetCodeClient;
use crate::load_config::load_config;
use crate::synchronise::{synchronise, SyncReport};

const REPOSITORY_DESCRIPTION: &str = "LeetCode solutions synced automatically";

/// Exit status when the operator interrupts a running sync.
const INTERRUPT_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[clap(
    name = "leetsync",
    version,
    about = "Sync accepted LeetCode submissions into a GitHub repository, organised by topic tag"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one sync pass: fetch, organise, and upload solutions
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Override the configured day window (0 or negative = all time)
        #[clap(long)]
        days: Option<i64>,
    },
    /// Create the target repository if it does not exist yet
    Init {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Test connectivity to both the LeetCode and GitHub APIs
    Check {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Async CLI logic entrypoint, extracted for integration tests and `main()`.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync { config, days } => {
            let mut settings = load_config(config)?;
            if let Some(days) = days {
                settings.days_to_look_back = days;
            }
            sync_command(&settings).await
        }
        Commands::Init { config } => {
            let settings = load_config(config)?;
            init_command(&settings).await
        }
        Commands::Check { config } => {
            let settings = load_config(config)?;
            check_command(&settings).await
        }
    }
}

fn build_clients(settings: &Settings) -> Result<(LeetCodeClient, GitHubClient)> {
    let leetcode = LeetCodeClient::new(&settings.leetcode_session, &settings.leetcode_csrf)
        .map_err(|e| anyhow!(e))?;
    let github = GitHubClient::new(
        &settings.github_token,
        &settings.github_username,
        &settings.github_repository,
    )
    .map_err(|e| anyhow!(e))?;
    Ok((leetcode, github))
}

async fn sync_command(settings: &Settings) -> Result<()> {
    use crate::contract::SolutionStore;

    let (leetcode, github) = build_clients(settings)?;

    // Setup tier: an absent repository is fatal before any sync work starts.
    let exists = github.repository_exists().await.map_err(|e| anyhow!(e))?;
    if !exists {
        bail!(
            "Repository '{}/{}' not found. Run `leetsync init` to create it.",
            settings.github_username,
            settings.github_repository
        );
    }

    println!("Sync starting...");
    let report = tokio::select! {
        report = synchronise(settings, &leetcode, &github) => report,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nSync interrupted by user");
            std::process::exit(INTERRUPT_EXIT_CODE);
        }
    };

    print_report(&report, &github.repository_url());
    Ok(())
}

async fn init_command(settings: &Settings) -> Result<()> {
    use crate::contract::SolutionStore;

    let github = GitHubClient::new(
        &settings.github_token,
        &settings.github_username,
        &settings.github_repository,
    )
    .map_err(|e| anyhow!(e))?;

    if github.repository_exists().await.map_err(|e| anyhow!(e))? {
        println!(
            "Repository '{}' already exists: {}",
            settings.github_repository,
            github.repository_url()
        );
        return Ok(());
    }

    github
        .create_repository(REPOSITORY_DESCRIPTION)
        .await
        .map_err(|e| anyhow!(e))?;
    println!("Created repository: {}", github.repository_url());
    Ok(())
}

async fn check_command(settings: &Settings) -> Result<()> {
    let (leetcode, github) = build_clients(settings)?;

    info!("Testing connections");
    let leetcode_ok = leetcode.test_connection().await;
    let github_ok = github.test_connection().await;

    println!(
        "LeetCode: {}",
        if leetcode_ok { "ok" } else { "FAILED" }
    );
    println!("GitHub:   {}", if github_ok { "ok" } else { "FAILED" });

    if !(leetcode_ok && github_ok) {
        bail!("Connection test failed");
    }
    println!("All connections successful");
    Ok(())
}

fn print_report(report: &SyncReport, repository_url: &str) {
    println!();
    println!("Sync Results");
    println!("  Total submissions found: {}", report.total_submissions);
    println!("  Filtered submissions:    {}", report.filtered_submissions);
    println!("  Files created/updated:   {}", report.files_created);
    println!("  Files skipped:           {}", report.files_skipped);
    println!("  Errors:                  {}", report.errors.len());
    println!("  Duration:                {:.2}s", report.duration_secs());

    if !report.tag_counts.is_empty() {
        println!("  Files by category:");
        for (folder, count) in &report.tag_counts {
            println!("    {folder}: {count} files");
        }
    }

    if !report.errors.is_empty() {
        println!("  Errors encountered:");
        for error in report.errors.iter().take(5) {
            println!("    - {error}");
        }
        if report.errors.len() > 5 {
            println!("    ... and {} more", report.errors.len() - 5);
        }
    }

    println!("View your solutions: {repository_url}");
}
