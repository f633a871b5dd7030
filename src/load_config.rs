//! Loads and adapts a static YAML config, including environment secret
//! injection, into the internal [`Settings`] value.
//!
//! This is the only place where untrusted YAML is parsed and mapped to the
//! strongly-typed internal struct, and the only place that reads the
//! environment. Secrets (session cookie, CSRF token, GitHub token) never
//! live in the YAML file.
//!
//! All errors here use `anyhow` for context-rich diagnostics and are
//! surfaced at the CLI boundary before any sync work begins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{error, info};

use crate::config::Settings;

#[derive(Debug, Deserialize)]
struct RawConfig {
    leetcode: LeetcodeSection,
    github: GithubSection,
    #[serde(default)]
    sync: SyncSection,
    tags: TagsSection,
}

#[derive(Debug, Deserialize)]
struct LeetcodeSection {
    username: String,
}

#[derive(Debug, Deserialize)]
struct GithubSection {
    username: String,
    #[serde(default = "default_repository")]
    repository: String,
    #[serde(default = "default_branch")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct SyncSection {
    #[serde(default = "default_days")]
    days_to_look_back: i64,
    #[serde(default = "default_only_accepted")]
    only_accepted: bool,
}

#[derive(Debug, Deserialize)]
struct TagsSection {
    #[serde(default)]
    active: Vec<String>,
    #[serde(default)]
    folders: HashMap<String, String>,
}

fn default_repository() -> String {
    "leetcode-solutions".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_days() -> i64 {
    30
}

fn default_only_accepted() -> bool {
    true
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            days_to_look_back: default_days(),
            only_accepted: default_only_accepted(),
        }
    }
}

/// Load the YAML config file and inject required secrets from the
/// environment. Missing usernames or secrets fail here, before any network
/// work is attempted.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read config file {path_ref:?}"))?;

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            bail!("Failed to parse config YAML: {e}");
        }
    };

    let leetcode_session = std::env::var("LEETCODE_SESSION").unwrap_or_default();
    let leetcode_csrf = std::env::var("LEETCODE_CSRF_TOKEN").unwrap_or_default();
    let github_token = std::env::var("GITHUB_TOKEN").unwrap_or_default();

    let settings = Settings {
        leetcode_username: raw.leetcode.username,
        leetcode_session,
        leetcode_csrf,
        github_username: raw.github.username,
        github_repository: raw.github.repository,
        github_branch: raw.github.branch,
        github_token,
        days_to_look_back: raw.sync.days_to_look_back,
        only_accepted: raw.sync.only_accepted,
        active_tags: raw.tags.active,
        tag_mappings: raw.tags.folders,
    };

    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<()> {
    let mut missing = Vec::new();

    if settings.leetcode_username.is_empty() {
        missing.push("leetcode.username (config file)");
    }
    if settings.github_username.is_empty() {
        missing.push("github.username (config file)");
    }
    if settings.leetcode_session.is_empty() {
        missing.push("LEETCODE_SESSION (environment)");
    }
    if settings.github_token.is_empty() {
        missing.push("GITHUB_TOKEN (environment)");
    }

    if !missing.is_empty() {
        error!(missing = ?missing, "Configuration validation failed");
        bail!("Missing required configuration: {}", missing.join(", "));
    }
    Ok(())
}
