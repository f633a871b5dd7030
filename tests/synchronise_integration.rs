use std::collections::HashMap;

use leetsync::config::Settings;
use leetsync::contract::{MockSolutionStore, MockSubmissionSource};
use leetsync::model::{Problem, Submission};
use leetsync::synchronise::synchronise;

fn settings() -> Settings {
    Settings {
        leetcode_username: "tester".to_string(),
        leetcode_session: "session".to_string(),
        leetcode_csrf: "csrf".to_string(),
        github_username: "tester".to_string(),
        github_repository: "leetcode-solutions".to_string(),
        github_branch: "main".to_string(),
        github_token: "token".to_string(),
        days_to_look_back: 30,
        only_accepted: true,
        active_tags: vec!["Array".to_string(), "Database".to_string()],
        tag_mappings: HashMap::from([
            ("Array".to_string(), "Arrays".to_string()),
            ("Database".to_string(), "Databases".to_string()),
        ]),
    }
}

fn submission(slug: &str, timestamp: i64, language: &str, tags: &[&str]) -> Submission {
    Submission {
        id: format!("{slug}-{timestamp}"),
        code: "code".to_string(),
        timestamp,
        status: "Accepted".to_string(),
        language: language.to_string(),
        runtime: None,
        memory: None,
        problem: Problem {
            question_id: "1".to_string(),
            title: slug.to_string(),
            title_slug: slug.to_string(),
            content: String::new(),
            difficulty: "Easy".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        },
    }
}

fn source_returning(submissions: Vec<Submission>) -> MockSubmissionSource {
    let mut source = MockSubmissionSource::new();
    source
        .expect_submissions_since()
        .returning(move |_, _| Ok(submissions.clone()));
    source
}

#[tokio::test]
async fn empty_fetch_finalises_with_zero_counts_and_no_errors() {
    let source = source_returning(Vec::new());
    // The store must never be touched when there is nothing to sync.
    let store = MockSolutionStore::new();

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.total_submissions, 0);
    assert_eq!(report.filtered_submissions, 0);
    assert_eq!(report.files_created, 0);
    assert_eq!(report.files_skipped, 0);
    assert!(report.errors.is_empty());
    assert!(report.end_time.is_some());
}

#[tokio::test]
async fn fetch_failure_is_recorded_as_an_error_not_a_panic() {
    let mut source = MockSubmissionSource::new();
    source
        .expect_submissions_since()
        .returning(|_, _| Err("network down".into()));
    let store = MockSolutionStore::new();

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.files_created, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("network down"));
    assert!(report.end_time.is_some());
}

#[tokio::test]
async fn submissions_without_active_tags_finalise_before_any_write() {
    let source = source_returning(vec![submission("lru-cache", 1, "cpp", &["Design"])]);
    let store = MockSolutionStore::new();

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.total_submissions, 1);
    assert_eq!(report.filtered_submissions, 0);
    assert_eq!(report.files_created, 0);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn non_accepted_submissions_are_dropped_when_configured() {
    let mut rejected = submission("two-sum", 2, "python3", &["Array"]);
    rejected.status = "Wrong Answer".to_string();
    let source = source_returning(vec![
        submission("two-sum", 1, "python3", &["Array"]),
        rejected,
    ]);

    let mut store = MockSolutionStore::new();
    store
        .expect_write_file()
        .times(1)
        .returning(|_, _, _, _| Ok(()));

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.total_submissions, 2);
    assert_eq!(report.filtered_submissions, 1);
    assert_eq!(report.files_created, 1);
    // Sole accepted submission keeps the suffix-free filename.
    assert_eq!(report.synced_problems, vec!["two-sum"]);
}

#[tokio::test]
async fn write_failure_mid_run_skips_that_entry_and_continues() {
    let slugs = ["alpha", "beta", "gamma", "delta", "epsilon"];
    let subs: Vec<Submission> = slugs
        .iter()
        .enumerate()
        .map(|(i, slug)| submission(slug, i as i64 + 1, "python3", &["Array"]))
        .collect();
    let source = source_returning(subs);

    let mut store = MockSolutionStore::new();
    store
        .expect_write_file()
        .times(5)
        .returning(|path, _, _, _| {
            if path.contains("gamma") {
                Err("upload rejected".into())
            } else {
                Ok(())
            }
        });

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.files_created, 4);
    assert_eq!(report.files_skipped, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Arrays/gamma.py"));
    // Entries after the failure were still processed.
    assert!(report.synced_problems.contains(&"delta".to_string()));
    assert!(report.synced_problems.contains(&"epsilon".to_string()));
    assert!(!report.synced_problems.contains(&"gamma".to_string()));
}

#[tokio::test]
async fn files_created_equals_sum_of_tag_counts() {
    let source = source_returning(vec![
        submission("two-sum", 1, "python3", &["Array"]),
        submission("three-sum", 2, "python3", &["Array"]),
        submission("combine-two-tables", 3, "mysql", &["Database"]),
    ]);

    let mut store = MockSolutionStore::new();
    store
        .expect_write_file()
        .times(3)
        .returning(|_, _, _, _| Ok(()));

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.files_created, 3);
    assert_eq!(report.tag_counts.values().sum::<usize>(), report.files_created);
    assert_eq!(report.tag_counts.get("Arrays"), Some(&2));
    assert_eq!(report.tag_counts.get("Databases"), Some(&1));
}

#[tokio::test]
async fn versioned_entries_use_versioned_paths_and_commit_messages() {
    let source = source_returning(vec![
        submission("combine-two-tables", 100, "mysql", &["Database"]),
        submission("combine-two-tables", 300, "mysql", &["Database"]),
        submission("combine-two-tables", 200, "mysql", &["Database"]),
    ]);

    let mut store = MockSolutionStore::new();
    for version in 1..=3u32 {
        store
            .expect_write_file()
            .withf(move |path, _content, message, branch| {
                path == format!("Databases/combine-two-tables_v{version}.sql")
                    && message == format!("Add: combine-two-tables (v{version})")
                    && branch == "main"
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));
    }

    let report = synchronise(&settings(), &source, &store).await;

    assert_eq!(report.files_created, 3);
    assert_eq!(report.tag_counts.get("Databases"), Some(&3));
    // One distinct problem across the three versions.
    assert_eq!(report.synced_problems.len(), 1);
}

#[tokio::test]
async fn success_rate_and_duration_reflect_the_run() {
    let source = source_returning(vec![
        submission("alpha", 1, "python3", &["Array"]),
        submission("beta", 2, "python3", &["Array"]),
    ]);

    let mut store = MockSolutionStore::new();
    store
        .expect_write_file()
        .times(2)
        .returning(|path, _, _, _| {
            if path.contains("beta") {
                Err("rejected".into())
            } else {
                Ok(())
            }
        });

    let report = synchronise(&settings(), &source, &store).await;

    assert!((report.success_rate() - 50.0).abs() < f64::EPSILON);
    assert!(report.duration_secs() >= 0.0);
}
