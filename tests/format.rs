use leetsync::format::{
    format_readme_header, format_readme_section, format_solution_file, format_tags, ReadmeEntry,
};
use leetsync::model::{Problem, Submission};
use leetsync::organise::Statistics;

fn submission(language: &str) -> Submission {
    Submission {
        id: "123".to_string(),
        code: "SELECT 1;".to_string(),
        // 2024-10-04 12:00:00 UTC
        timestamp: 1_728_043_200,
        status: "Accepted".to_string(),
        language: language.to_string(),
        runtime: Some("312 ms".to_string()),
        memory: Some("0 MB".to_string()),
        problem: Problem {
            question_id: "175".to_string(),
            title: "Combine Two Tables".to_string(),
            title_slug: "combine-two-tables".to_string(),
            content: String::new(),
            difficulty: "Easy".to_string(),
            tags: vec!["Database".to_string()],
        },
    }
}

#[test]
fn sql_languages_get_single_line_comment_headers() {
    for lang in ["mysql", "mssql", "oraclesql", "postgresql"] {
        let content = format_solution_file(&submission(lang), 0);

        assert!(content.starts_with("-- Problem: 175. Combine Two Tables\n"));
        assert!(content.contains("-- Link: https://leetcode.com/problems/combine-two-tables/\n"));
        assert!(content.contains("-- Difficulty: Easy\n"));
        assert!(content.contains("-- Tags: Database\n"));
        assert!(content.contains("-- Submitted: 2024-10-04 12:00:00\n"));
        assert!(content.contains("-- Status: Accepted\n"));
        // SQL headers carry no runtime/memory/language lines.
        assert!(!content.contains("Runtime"));
        assert!(!content.contains("/*"));
    }
}

#[test]
fn generic_languages_get_block_comment_headers() {
    let mut sub = submission("python3");
    sub.code = "class Solution: pass".to_string();
    let content = format_solution_file(&sub, 0);

    assert!(content.starts_with("/*\n * Problem: 175. Combine Two Tables\n"));
    assert!(content.contains(" * - Runtime: 312 ms\n"));
    assert!(content.contains(" * - Memory: 0 MB\n"));
    assert!(content.contains(" * - Language: python3\n"));
    assert!(content.contains(" */\n"));
    // No version line for a sole submission.
    assert!(!content.contains("Version:"));
}

#[test]
fn version_line_appears_only_for_positive_versions() {
    let sub = submission("rust");

    let v0 = format_solution_file(&sub, 0);
    assert!(!v0.contains(" * - Version:"));

    let v2 = format_solution_file(&sub, 2);
    assert!(v2.contains(" * - Version: 2\n"));
}

#[test]
fn header_and_code_are_separated_by_one_blank_line() {
    let content = format_solution_file(&submission("mysql"), 0);
    assert!(content.ends_with("-- Status: Accepted\n\nSELECT 1;"));

    let block = format_solution_file(&submission("rust"), 0);
    assert!(block.ends_with(" */\n\nSELECT 1;"));
}

#[test]
fn missing_metrics_render_as_not_available() {
    let mut sub = submission("rust");
    sub.runtime = None;
    sub.memory = Some(String::new());
    let content = format_solution_file(&sub, 0);

    assert!(content.contains(" * - Runtime: N/A\n"));
    assert!(content.contains(" * - Memory: N/A\n"));
}

#[test]
fn readme_section_lists_problems_in_a_table() {
    let problems = vec![
        ReadmeEntry {
            id: "1".to_string(),
            title: "Two Sum".to_string(),
            url: "https://leetcode.com/problems/two-sum/".to_string(),
            difficulty: "Easy".to_string(),
            solutions: 3,
        },
        ReadmeEntry {
            id: "15".to_string(),
            title: "3Sum".to_string(),
            url: "https://leetcode.com/problems/3sum/".to_string(),
            difficulty: "Medium".to_string(),
            solutions: 1,
        },
    ];

    let section = format_readme_section("Arrays", &problems);

    assert!(section.contains("## Arrays\n"));
    assert!(section.contains("**Total Problems:** 2\n"));
    assert!(section.contains("| # | Problem | Difficulty | Solutions |\n"));
    assert!(section.contains("| 1 | [Two Sum](https://leetcode.com/problems/two-sum/) | Easy | 3 |\n"));
    assert!(section.contains("| 15 | [3Sum](https://leetcode.com/problems/3sum/) | Medium | 1 |\n"));
}

#[test]
fn readme_section_omits_table_when_empty() {
    let section = format_readme_section("Trees", &[]);

    assert!(section.contains("## Trees\n"));
    assert!(section.contains("**Total Problems:** 0\n"));
    assert!(!section.contains("| # |"));
}

#[test]
fn readme_header_reports_overall_statistics() {
    let stats = Statistics {
        total: 10,
        easy: 4,
        medium: 5,
        hard: 1,
        by_tag: Default::default(),
        unique_problems: 8,
    };

    let header = format_readme_header(&stats, "2024-10-04");

    assert!(header.starts_with("# LeetCode Solutions\n"));
    assert!(header.contains("**Total Problems Solved:** 8\n"));
    assert!(header.contains("**Easy:** 4 | **Medium:** 5 | **Hard:** 1\n"));
    assert!(header.contains("**Last Updated:** 2024-10-04\n"));
}

#[test]
fn tags_join_with_comma_and_space() {
    let tags = vec!["Array".to_string(), "Hash Table".to_string()];
    assert_eq!(format_tags(&tags), "Array, Hash Table");
    assert_eq!(format_tags(&[]), "");
}
