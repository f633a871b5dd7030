//! Solution organiser: tag filtering, folder resolution, grouping and
//! version assignment.
//!
//! This is the deterministic core of a sync run. Given an unordered batch of
//! submissions it decides which folder each problem lands in, how multiple
//! submissions to the same problem are sequenced into versioned filenames,
//! and what the aggregate statistics look like. Everything here is pure:
//! same inputs, same outputs, no I/O.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::model::Submission;

/// Folder used when no active tag of a problem has a mapping.
pub const FALLBACK_FOLDER: &str = "Others";

const MAX_FILENAME_LENGTH: usize = 200;
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// One output file derived from a submission: where it goes and which
/// version it is. Version 0 means "sole submission for this problem" and the
/// filename carries no suffix; versions 1..N are assigned by ascending
/// submission timestamp.
#[derive(Debug, Clone)]
pub struct OrganisedFile {
    pub folder: String,
    /// Full repository path, `<folder>/<filename>`.
    pub path: String,
    pub submission: Submission,
    pub version: u32,
}

/// Aggregate counts over a batch of submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub by_tag: BTreeMap<String, usize>,
    pub unique_problems: usize,
}

/// Organises submissions by topic tag and manages solution versions.
pub struct Organiser {
    /// Tag (lowercased) → folder name.
    tag_mappings: HashMap<String, String>,
    /// Lowercased allow-list of tags eligible for syncing.
    active_tags: Vec<String>,
}

impl Organiser {
    pub fn new(tag_mappings: &HashMap<String, String>, active_tags: &[String]) -> Self {
        Self {
            tag_mappings: tag_mappings
                .iter()
                .map(|(tag, folder)| (tag.to_lowercase(), folder.clone()))
                .collect(),
            active_tags: active_tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Keep only submissions whose problem has at least one active tag.
    /// Input order is preserved; empty input yields empty output.
    pub fn filter_by_tags(&self, submissions: Vec<Submission>) -> Vec<Submission> {
        let filtered: Vec<Submission> = submissions
            .into_iter()
            .filter(|sub| {
                self.active_tags
                    .iter()
                    .any(|active| sub.problem.has_tag(active))
            })
            .collect();

        info!(count = filtered.len(), "Filtered submissions matching active tags");
        filtered
    }

    /// Destination folder for a submission: the first problem tag (in
    /// upstream order) that is both active and mapped wins. Active tags
    /// without a mapping fall through to later tags; no match at all lands
    /// in [`FALLBACK_FOLDER`].
    ///
    /// Upstream tag order is not documented as stable, and this first-match
    /// policy is deliberately kept order-sensitive to match the source
    /// platform's behaviour. No secondary sort is applied.
    pub fn folder_for(&self, submission: &Submission) -> String {
        for tag in &submission.problem.tags {
            let tag_lower = tag.to_lowercase();
            if !self.active_tags.contains(&tag_lower) {
                continue;
            }
            if let Some(folder) = self.tag_mappings.get(&tag_lower) {
                return folder.clone();
            }
        }
        FALLBACK_FOLDER.to_string()
    }

    /// Group submissions by problem slug, each group sorted by ascending
    /// timestamp. Groups keep the first-encounter order of their slugs, so
    /// refetched duplicates of the same problem merge into one group.
    pub fn group_by_problem(
        &self,
        submissions: Vec<Submission>,
    ) -> Vec<(String, Vec<Submission>)> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<Submission>)> = Vec::new();

        for submission in submissions {
            let slug = submission.problem.title_slug.clone();
            match index.get(&slug) {
                Some(&i) => groups[i].1.push(submission),
                None => {
                    index.insert(slug.clone(), groups.len());
                    groups.push((slug, vec![submission]));
                }
            }
        }

        for (_, group) in &mut groups {
            group.sort_by_key(|sub| sub.timestamp);
        }

        groups
    }

    /// Turn a batch of submissions into organised file entries.
    ///
    /// A problem with a single submission yields one entry at version 0 with
    /// no filename suffix; multiple submissions yield entries at versions
    /// 1..N. The whole group shares the folder resolved from its earliest
    /// submission's tags.
    pub fn organise_files(&self, submissions: Vec<Submission>) -> Vec<OrganisedFile> {
        let grouped = self.group_by_problem(submissions);
        let mut files = Vec::new();
        let problem_count = grouped.len();

        for (slug, group) in grouped {
            let folder = self.folder_for(&group[0]);
            let multi = group.len() > 1;

            for (i, sub) in group.into_iter().enumerate() {
                let version = if multi { (i + 1) as u32 } else { 0 };
                let filename = slug_to_filename(&slug, version, sub.file_extension());
                files.push(OrganisedFile {
                    path: format!("{folder}/{filename}"),
                    folder: folder.clone(),
                    submission: sub,
                    version,
                });
            }
        }

        info!(
            files = files.len(),
            problems = problem_count,
            "Organised submissions into files"
        );
        files
    }

    /// Aggregate statistics for a batch of submissions. Difficulties other
    /// than the three known labels are excluded from all buckets; a
    /// submission with K tags increments K tag counters.
    pub fn statistics(&self, submissions: &[Submission]) -> Statistics {
        let mut stats = Statistics {
            total: submissions.len(),
            ..Statistics::default()
        };

        let mut slugs: HashSet<&str> = HashSet::new();
        for sub in submissions {
            match sub.problem.difficulty.to_lowercase().as_str() {
                "easy" => stats.easy += 1,
                "medium" => stats.medium += 1,
                "hard" => stats.hard += 1,
                _ => {}
            }
            for tag in &sub.problem.tags {
                *stats.by_tag.entry(tag.clone()).or_insert(0) += 1;
            }
            slugs.insert(&sub.problem.title_slug);
        }
        stats.unique_problems = slugs.len();

        stats
    }
}

/// Strip blacklisted characters, collapse hyphen runs, trim edge hyphens and
/// truncate to the maximum filename length. A slug that is already clean and
/// short enough passes through unchanged.
pub fn sanitise_filename(filename: &str) -> String {
    static HYPHEN_RUN: OnceLock<Regex> = OnceLock::new();
    let hyphen_run = HYPHEN_RUN.get_or_init(|| Regex::new("-+").expect("valid regex"));

    let replaced: String = filename
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '-' } else { c })
        .collect();
    let collapsed = hyphen_run.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');

    trimmed.chars().take(MAX_FILENAME_LENGTH).collect()
}

/// Build a filename from a problem slug: `<slug><ext>` for version 0,
/// `<slug>_v<N><ext>` otherwise.
pub fn slug_to_filename(slug: &str, version: u32, extension: &str) -> String {
    let base = sanitise_filename(slug);
    if version > 0 {
        format!("{base}_v{version}{extension}")
    } else {
        format!("{base}{extension}")
    }
}
