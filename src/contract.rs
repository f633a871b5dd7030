//! Traits at the two external seams: the submission source (LeetCode) and
//! the solution store (GitHub).
//!
//! This module is the *interface* only. Concrete clients live in
//! [`crate::leetcode`] and [`crate::github`]; tests use the generated
//! `mockall` mocks (exported via the `test-export-mocks` feature, on by
//! default, mirroring how the rest of the crate is integration-tested).
//!
//! All methods are async and return boxed error trait objects so that
//! implementors are free in their transport and error representations.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::model::Submission;

/// Error type for the fetch seam.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for the store seam.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies submissions for a user within a day-count window.
///
/// `days_back <= 0` means no lower time bound is applied. Implementors retry
/// transient failures internally and drop individually unfetchable
/// submissions; an `Err` here means the source could not be used at all.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn submissions_since(
        &self,
        username: &str,
        days_back: i64,
    ) -> Result<Vec<Submission>, SourceError>;
}

/// Remote content store keyed by path, with create-or-update semantics.
///
/// Backed by the GitHub contents API in production; the contract is a plain
/// key-value store plus repository bootstrap, so anything path-addressable
/// can implement it.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SolutionStore: Send + Sync {
    /// Whether a file already exists at `path` on `branch`.
    async fn file_exists(&self, path: &str, branch: &str) -> Result<bool, StoreError>;

    /// Read the file at `path`, `None` when absent.
    async fn read_file(&self, path: &str, branch: &str)
        -> Result<Option<String>, StoreError>;

    /// Create the file at `path` or overwrite it if present.
    async fn write_file(
        &self,
        path: &str,
        content: &str,
        commit_message: &str,
        branch: &str,
    ) -> Result<(), StoreError>;

    /// Whether the configured repository exists at all.
    async fn repository_exists(&self) -> Result<bool, StoreError>;

    /// Create the configured repository.
    async fn create_repository(&self, description: &str) -> Result<(), StoreError>;
}
