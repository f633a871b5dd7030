//! High-level pipeline: fetch → filter → organise → format → write.
//!
//! One call to [`synchronise`] performs one deterministic sync pass and
//! always hands back a [`SyncReport`], even a mostly-empty one. Errors along
//! the way are data in the report, not exceptions: a failed fetch or an
//! empty batch finalises early with counts, and a failed write skips that
//! one file and moves on. Only setup failures (bad config, unreachable
//! APIs) are surfaced before this pipeline runs at all.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::contract::{SolutionStore, SubmissionSource};
use crate::format;
use crate::organise::Organiser;

/// Mutable accumulator for one sync run. Created at the start, mutated
/// throughout, finalised with [`SyncReport::finish`] and then reported.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub total_submissions: usize,
    pub filtered_submissions: usize,
    pub files_created: usize,
    pub files_skipped: usize,
    pub errors: Vec<String>,
    /// Distinct titles of successfully synced problems, in first-sync order.
    pub synced_problems: Vec<String>,
    /// Destination folder → number of files written there.
    pub tag_counts: BTreeMap<String, usize>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            total_submissions: 0,
            filtered_submissions: 0,
            files_created: 0,
            files_skipped: 0,
            errors: Vec::new(),
            synced_problems: Vec::new(),
            tag_counts: BTreeMap::new(),
            start_time: Utc::now(),
            end_time: None,
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn add_synced_problem(&mut self, title: &str) {
        if !self.synced_problems.iter().any(|t| t == title) {
            self.synced_problems.push(title.to_string());
        }
    }

    pub fn increment_tag_count(&mut self, folder: &str) {
        *self.tag_counts.entry(folder.to_string()).or_insert(0) += 1;
    }

    /// Stamp the end time; idempotent per run.
    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, 0 until finished.
    pub fn duration_secs(&self) -> f64 {
        self.end_time.map_or(0.0, |end| {
            (end - self.start_time).num_milliseconds() as f64 / 1000.0
        })
    }

    /// Percentage of attempted files that were written.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.files_created + self.files_skipped;
        if attempted == 0 {
            return 0.0;
        }
        self.files_created as f64 / attempted as f64 * 100.0
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one full sync pass for the configured user against the given source
/// and store.
pub async fn synchronise<S, W>(settings: &Settings, source: &S, store: &W) -> SyncReport
where
    S: SubmissionSource,
    W: SolutionStore,
{
    let mut report = SyncReport::new();
    let organiser = Organiser::new(&settings.tag_mappings, &settings.active_tags);

    info!("[SYNC] Starting LeetCode to GitHub sync");

    // Step 1: fetch within the day window.
    let submissions = match source
        .submissions_since(&settings.leetcode_username, settings.days_to_look_back)
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => {
            error!(error = ?e, "[SYNC][ERROR] Fetching submissions failed");
            report.add_error(format!("Sync failed: {e}"));
            report.finish();
            return report;
        }
    };

    report.total_submissions = submissions.len();
    info!(count = submissions.len(), "[SYNC] Found submissions");

    if submissions.is_empty() {
        warn!("[SYNC] No submissions found");
        report.finish();
        return report;
    }

    // Step 2: optionally keep accepted submissions only.
    let submissions = if settings.only_accepted {
        let accepted: Vec<_> = submissions.into_iter().filter(|s| s.is_accepted()).collect();
        info!(count = accepted.len(), "[SYNC] Filtered to accepted submissions");
        accepted
    } else {
        submissions
    };

    // Step 3: tag allow-list filter.
    let submissions = organiser.filter_by_tags(submissions);
    report.filtered_submissions = submissions.len();

    if submissions.is_empty() {
        warn!("[SYNC] No submissions match the active tags");
        report.finish();
        return report;
    }

    let stats = organiser.statistics(&submissions);
    info!(
        unique_problems = stats.unique_problems,
        easy = stats.easy,
        medium = stats.medium,
        hard = stats.hard,
        "[SYNC] Submission statistics"
    );

    // Step 4: organise into versioned file entries.
    let files = organiser.organise_files(submissions);
    info!(count = files.len(), "[SYNC] Organised into files");

    let versioned = files.iter().filter(|f| f.version > 1).count();
    if versioned > 0 {
        info!(count = versioned, "[SYNC] Problems with multiple solutions");
    }

    // Step 5: write loop. A failed entry is recorded and skipped; the loop
    // always continues to the next entry.
    info!("[SYNC] Uploading to GitHub");
    for entry in &files {
        let content = format::format_solution_file(&entry.submission, entry.version);
        let commit_msg = if entry.version > 0 {
            format!("Add: {} (v{})", entry.submission.problem.title, entry.version)
        } else {
            format!("Add: {}", entry.submission.problem.title)
        };

        match store
            .write_file(&entry.path, &content, &commit_msg, &settings.github_branch)
            .await
        {
            Ok(()) => {
                report.files_created += 1;
                report.add_synced_problem(&entry.submission.problem.title);
                report.increment_tag_count(&entry.folder);
            }
            Err(e) => {
                error!(path = %entry.path, error = ?e, "[SYNC][ERROR] Failed to write file");
                report.files_skipped += 1;
                report.add_error(format!("{}: {e}", entry.path));
            }
        }
    }

    info!(
        created = report.files_created,
        skipped = report.files_skipped,
        errors = report.errors.len(),
        "[SYNC] Sync completed"
    );

    // Step 6: finalise.
    report.finish();
    report
}
