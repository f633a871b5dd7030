//! Rendering of solution files and README sections.
//!
//! Purely presentational: a metadata header (comment style depends on the
//! submission language) followed by a blank line and the raw code.

use crate::model::Submission;
use crate::organise::Statistics;

/// A single row in a README tag section.
#[derive(Debug, Clone)]
pub struct ReadmeEntry {
    pub id: String,
    pub title: String,
    pub url: String,
    pub difficulty: String,
    /// Number of synced solution files for this problem.
    pub solutions: usize,
}

/// Render a complete solution file: metadata header, blank line, raw code.
///
/// SQL-family languages get a `--` single-line comment header; everything
/// else gets a block comment that additionally carries runtime, memory,
/// language, and (for `version > 0`) a version line.
pub fn format_solution_file(submission: &Submission, version: u32) -> String {
    let problem = &submission.problem;
    let tags = format_tags(&problem.tags);
    let timestamp = submission.formatted_timestamp();

    let header = if submission.is_sql() {
        let mut h = String::new();
        h.push_str(&format!(
            "-- Problem: {}. {}\n",
            problem.question_id, problem.title
        ));
        h.push_str(&format!("-- Link: {}\n", problem.url()));
        h.push_str(&format!("-- Difficulty: {}\n", problem.difficulty));
        h.push_str(&format!("-- Tags: {tags}\n"));
        h.push_str(&format!("-- Submitted: {timestamp}\n"));
        h.push_str(&format!("-- Status: {}\n", submission.status));
        h
    } else {
        let mut h = String::from("/*\n");
        h.push_str(&format!(
            " * Problem: {}. {}\n",
            problem.question_id, problem.title
        ));
        h.push_str(&format!(" * Link: {}\n", problem.url()));
        h.push_str(&format!(" * Difficulty: {}\n", problem.difficulty));
        h.push_str(&format!(" * Tags: {tags}\n"));
        h.push_str(" *\n * Submission Info:\n");
        h.push_str(&format!(" * - Submitted: {timestamp}\n"));
        h.push_str(&format!(" * - Status: {}\n", submission.status));
        h.push_str(&format!(
            " * - Runtime: {}\n",
            display_metric(submission.runtime.as_deref())
        ));
        h.push_str(&format!(
            " * - Memory: {}\n",
            display_metric(submission.memory.as_deref())
        ));
        h.push_str(&format!(" * - Language: {}\n", submission.language));
        if version > 0 {
            h.push_str(&format!(" * - Version: {version}\n"));
        }
        h.push_str(" */\n");
        h
    };

    format!("{header}\n{code}", code = submission.code)
}

/// Render one Markdown README section for a tag: heading, total count and,
/// when non-empty, a table with one row per problem.
pub fn format_readme_section(tag: &str, problems: &[ReadmeEntry]) -> String {
    let mut section = format!("\n## {tag}\n\n**Total Problems:** {}\n\n", problems.len());

    if !problems.is_empty() {
        section.push_str("| # | Problem | Difficulty | Solutions |\n");
        section.push_str("|---|---------|------------|-----------|\n");
        for prob in problems {
            section.push_str(&format!(
                "| {} | [{}]({}) | {} | {} |\n",
                prob.id, prob.title, prob.url, prob.difficulty, prob.solutions
            ));
        }
    }

    section
}

/// Render the repository README header with overall statistics.
pub fn format_readme_header(stats: &Statistics, date: &str) -> String {
    format!(
        "# LeetCode Solutions\n\n\
         Auto-synced from LeetCode account.\n\n\
         ## Statistics\n\n\
         - **Total Problems Solved:** {total}\n\
         - **Easy:** {easy} | **Medium:** {medium} | **Hard:** {hard}\n\
         - **Last Updated:** {date}\n\n\
         ---\n\n",
        total = stats.unique_problems,
        easy = stats.easy,
        medium = stats.medium,
        hard = stats.hard,
    )
}

/// Comma-joined tag list.
pub fn format_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Runtime/memory display strings come through as-is; absent or empty
/// values render as `N/A`.
fn display_metric(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}
