//! Domain models: problems and submissions as fetched from LeetCode.
//!
//! Both types are plain immutable data; everything derived (URL, extension,
//! formatted timestamps) is computed on demand rather than stored.

use chrono::DateTime;

/// A LeetCode problem as attached to a submission detail response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub question_id: String,
    pub title: String,
    pub title_slug: String,
    pub content: String,
    pub difficulty: String,
    /// Topic tags in the order the upstream API returned them.
    pub tags: Vec<String>,
}

impl Problem {
    /// Public URL of the problem on leetcode.com.
    pub fn url(&self) -> String {
        format!("https://leetcode.com/problems/{}/", self.title_slug)
    }

    /// Case-insensitive tag membership check.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// One submission, always owning exactly one [`Problem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    pub code: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub status: String,
    pub language: String,
    pub runtime: Option<String>,
    pub memory: Option<String>,
    pub problem: Problem,
}

/// Closed language → extension table. Unrecognised languages fall back to
/// the generic text extension instead of failing.
const EXTENSIONS: &[(&str, &str)] = &[
    ("python", ".py"),
    ("python3", ".py"),
    ("java", ".java"),
    ("cpp", ".cpp"),
    ("c", ".c"),
    ("csharp", ".cs"),
    ("javascript", ".js"),
    ("typescript", ".ts"),
    ("ruby", ".rb"),
    ("swift", ".swift"),
    ("golang", ".go"),
    ("scala", ".scala"),
    ("kotlin", ".kt"),
    ("rust", ".rs"),
    ("php", ".php"),
    ("mysql", ".sql"),
    ("mssql", ".sql"),
    ("oraclesql", ".sql"),
    ("postgresql", ".sql"),
];

const DEFAULT_EXTENSION: &str = ".txt";

/// Languages whose solution files use single-line `--` comment headers.
const SQL_LANGUAGES: &[&str] = &["mysql", "mssql", "oraclesql", "postgresql"];

impl Submission {
    /// Only accepted submissions participate in a sync.
    pub fn is_accepted(&self) -> bool {
        self.status == "Accepted"
    }

    /// File extension for the submission's language, `.txt` when unknown.
    pub fn file_extension(&self) -> &'static str {
        let lang = self.language.to_lowercase();
        EXTENSIONS
            .iter()
            .find(|(name, _)| *name == lang)
            .map_or(DEFAULT_EXTENSION, |(_, ext)| ext)
    }

    /// Whether the submission language belongs to the SQL family.
    pub fn is_sql(&self) -> bool {
        let lang = self.language.to_lowercase();
        SQL_LANGUAGES.contains(&lang.as_str())
    }

    /// Submission time rendered as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub fn formatted_timestamp(&self) -> String {
        DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or(DateTime::UNIX_EPOCH)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
