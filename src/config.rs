//! Runtime configuration for one sync run.
//!
//! Constructed once by [`crate::load_config`] and passed by reference into
//! the clients, the organiser and the orchestrator. There is no ambient or
//! global lookup anywhere in the crate.

use std::collections::HashMap;

/// Complete, immutable settings for a run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub leetcode_username: String,
    /// `LEETCODE_SESSION` cookie value.
    pub leetcode_session: String,
    /// CSRF token, may be empty.
    pub leetcode_csrf: String,

    pub github_username: String,
    pub github_repository: String,
    pub github_branch: String,
    pub github_token: String,

    /// Day-count window for fetching; `<= 0` means no lower bound.
    pub days_to_look_back: i64,
    /// Drop non-accepted submissions before organising.
    pub only_accepted: bool,

    /// Allow-list of topic tags eligible for syncing.
    pub active_tags: Vec<String>,
    /// Topic tag → destination folder name.
    pub tag_mappings: HashMap<String, String>,
}
