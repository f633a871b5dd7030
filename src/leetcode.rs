//! LeetCode GraphQL client: submission summaries, per-submission detail and
//! the date-windowed fetch used by the orchestrator.
//!
//! All requests go through one retry helper: bounded attempts, a fixed delay
//! between attempts and a distinct longer pause on a 429 response. After the
//! attempts are exhausted a call yields "no data" instead of an error, so a
//! single unfetchable submission never aborts a run. Consecutive detail
//! requests are paced with a small fixed delay to avoid upstream throttling.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::contract::{SourceError, SubmissionSource};
use crate::model::{Problem, Submission};

const GRAPHQL_ENDPOINT: &str = "https://leetcode.com/graphql";

const DEFAULT_SUBMISSION_LIMIT: u32 = 200;
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);
const RATE_LIMIT_PAUSE: Duration = Duration::from_secs(5);
const DETAIL_REQUEST_PACING: Duration = Duration::from_millis(500);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RECENT_SUBMISSIONS_QUERY: &str = r#"
query recentAcSubmissions($username: String!, $limit: Int!) {
  recentAcSubmissionList(username: $username, limit: $limit) {
    id
    title
    titleSlug
    timestamp
  }
}
"#;

const SUBMISSION_DETAIL_QUERY: &str = r#"
query submissionDetails($submissionId: Int!) {
  submissionDetails(submissionId: $submissionId) {
    id
    code
    timestamp
    lang {
      name
    }
    runtimeDisplay
    memoryDisplay
    question {
      questionId
      title
      titleSlug
      content
      difficulty
      topicTags {
        name
      }
    }
  }
}
"#;

const USER_STATUS_QUERY: &str = r#"
query globalData {
  userStatus {
    username
    isSignedIn
  }
}
"#;

/// Client for the LeetCode GraphQL API, authenticated via session cookie.
pub struct LeetCodeClient {
    http: reqwest::Client,
}

/// One entry of the recent-submissions listing. Title fields also come over
/// the wire but only id and timestamp drive the detail fetch.
#[derive(Debug, Deserialize)]
struct RecentSubmission {
    id: Value,
    timestamp: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionDetail {
    id: Option<Value>,
    code: Option<String>,
    timestamp: Option<Value>,
    lang: Option<LangInfo>,
    runtime_display: Option<String>,
    memory_display: Option<String>,
    question: Option<QuestionDetail>,
}

#[derive(Debug, Deserialize)]
struct LangInfo {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDetail {
    question_id: Option<String>,
    title: Option<String>,
    title_slug: Option<String>,
    content: Option<String>,
    difficulty: Option<String>,
    topic_tags: Option<Vec<TopicTag>>,
}

#[derive(Debug, Deserialize)]
struct TopicTag {
    name: Option<String>,
}

/// The API is inconsistent about numeric fields: listing ids/timestamps are
/// strings, detail ones are numbers.
fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl LeetCodeClient {
    pub fn new(session_cookie: &str, csrf_token: &str) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!(
                "LEETCODE_SESSION={session_cookie}; csrftoken={csrf_token}"
            ))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
            ),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://leetcode.com"));
        headers.insert("X-CSRFToken", HeaderValue::from_str(csrf_token)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http })
    }

    /// Execute a GraphQL query with retry. Returns the `data` payload, or
    /// `None` once the attempts are exhausted or the response is unusable.
    async fn graphql(&self, query: &str, variables: Value) -> Option<Value> {
        let payload = json!({ "query": query, "variables": variables });

        for attempt in 0..RETRY_ATTEMPTS {
            match self.http.post(GRAPHQL_ENDPOINT).json(&payload).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == reqwest::StatusCode::OK {
                        let body: Value = match response.json().await {
                            Ok(body) => body,
                            Err(e) => {
                                error!(error = ?e, "Failed to decode GraphQL response body");
                                continue_delay(attempt).await;
                                continue;
                            }
                        };
                        if let Some(errors) = body.get("errors") {
                            error!(errors = %errors, "GraphQL errors in response");
                            return None;
                        }
                        return body.get("data").cloned();
                    } else if status == reqwest::StatusCode::BAD_REQUEST {
                        warn!("Bad request (400), possibly rate limited or invalid submission id");
                        return None;
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        warn!("Rate limited (429), pausing before retry");
                        tokio::time::sleep(RATE_LIMIT_PAUSE).await;
                        continue;
                    } else {
                        warn!(status = %status, "GraphQL request failed");
                    }
                }
                Err(e) => {
                    error!(error = ?e, attempt = attempt + 1, "GraphQL request error");
                }
            }
            continue_delay(attempt).await;
        }

        None
    }

    /// Fetch the bounded list of recent accepted submission summaries.
    /// Returns an empty list when the query yields no usable data.
    async fn recent_submissions(&self, username: &str, limit: u32) -> Vec<RecentSubmission> {
        info!(username, "Fetching recent submissions");

        let variables = json!({ "username": username, "limit": limit });
        let data = self.graphql(RECENT_SUBMISSIONS_QUERY, variables).await;

        let list = data.and_then(|d| {
            d.get("recentAcSubmissionList")
                .cloned()
                .and_then(|v| serde_json::from_value::<Vec<RecentSubmission>>(v).ok())
        });

        match list {
            Some(submissions) => {
                info!(count = submissions.len(), "Found recent submissions");
                submissions
            }
            None => {
                error!("Failed to fetch recent submissions");
                Vec::new()
            }
        }
    }

    /// Fetch full detail (code, metadata, problem) for one submission.
    /// `None` means "unfetchable, skip this one" and is never fatal.
    async fn submission_detail(&self, submission_id: i64) -> Option<Submission> {
        debug!(submission_id, "Fetching submission detail");

        let variables = json!({ "submissionId": submission_id });
        let data = self.graphql(SUBMISSION_DETAIL_QUERY, variables).await?;

        let detail: SubmissionDetail = data
            .get("submissionDetails")
            .filter(|v| !v.is_null())
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .or_else(|| {
                warn!(submission_id, "Failed to fetch submission, skipping");
                None
            })?;

        let code = match detail.code {
            Some(code) => code,
            None => {
                warn!(submission_id, "Submission has no code, skipping");
                return None;
            }
        };

        let question = detail.question.unwrap_or_default();

        let problem = Problem {
            question_id: question.question_id.unwrap_or_default(),
            title: question.title.unwrap_or_default(),
            title_slug: question.title_slug.unwrap_or_default(),
            content: question.content.unwrap_or_default(),
            difficulty: question.difficulty.unwrap_or_else(|| "Unknown".to_string()),
            tags: question
                .topic_tags
                .unwrap_or_default()
                .into_iter()
                .map(|tag| tag.name.unwrap_or_default())
                .collect(),
        };

        let submission = Submission {
            id: detail.id.as_ref().map(value_to_string).unwrap_or_default(),
            code,
            timestamp: detail.timestamp.as_ref().map(value_to_i64).unwrap_or(0),
            // The recent-submissions listing only ever contains accepted runs.
            status: "Accepted".to_string(),
            language: detail.lang.and_then(|l| l.name).unwrap_or_default(),
            runtime: detail.runtime_display,
            memory: detail.memory_display,
            problem,
        };

        debug!(title = %submission.problem.title, "Fetched submission detail");
        Some(submission)
    }

    /// Verify the session is usable by asking for the signed-in user.
    pub async fn test_connection(&self) -> bool {
        let data = self.graphql(USER_STATUS_QUERY, json!({})).await;

        match data.as_ref().and_then(|d| d.get("userStatus")) {
            Some(status) => {
                if status
                    .get("isSignedIn")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                {
                    let username = status
                        .get("username")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown");
                    info!(username, "LeetCode connection test successful");
                    true
                } else {
                    error!("LeetCode connection test failed: not signed in");
                    false
                }
            }
            None => {
                error!("LeetCode connection test failed: invalid response");
                false
            }
        }
    }
}

async fn continue_delay(attempt: u32) {
    if attempt < RETRY_ATTEMPTS - 1 {
        tokio::time::sleep(RETRY_DELAY).await;
    }
}

#[async_trait]
impl SubmissionSource for LeetCodeClient {
    async fn submissions_since(
        &self,
        username: &str,
        days_back: i64,
    ) -> Result<Vec<Submission>, SourceError> {
        info!(days_back, "Fetching submissions within date window");

        let summaries = self
            .recent_submissions(username, DEFAULT_SUBMISSION_LIMIT)
            .await;
        if summaries.is_empty() {
            return Ok(Vec::new());
        }

        let cutoff = (Utc::now() - chrono::Duration::days(days_back)).timestamp();
        if days_back > 0 {
            info!(cutoff, "Applying submission time cutoff");
        }

        let mut submissions = Vec::new();
        for summary in summaries {
            let timestamp = value_to_i64(&summary.timestamp);
            if days_back > 0 && timestamp < cutoff {
                continue;
            }

            let submission_id = value_to_i64(&summary.id);
            if let Some(submission) = self.submission_detail(submission_id).await {
                submissions.push(submission);
            }

            // Cooperative pacing between detail requests.
            tokio::time::sleep(DETAIL_REQUEST_PACING).await;
        }

        info!(
            count = submissions.len(),
            "Fetched submissions within date window"
        );
        Ok(submissions)
    }
}
