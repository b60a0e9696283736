use std::sync::Arc;
use std::time::Duration;

use hearing_linkage::payload::coerce_to_sequence;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{Chamber, MeetingType};
use crate::{CongressURL, Throttler};

const USER_AGENT: &str = concat!("congress-api/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Page size for list endpoints; the API maximum.
pub const PAGE_LIMIT: usize = 250;

type QueryParams = Vec<(&'static str, String)>;

/// Retry schedule for a single API request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry that follows failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64();
        let max = self.max_delay.as_secs_f64();

        // initial_delay * 2^(attempt - 1)
        let exp_backoff = base * 2_f64.powi(attempt.saturating_sub(1) as i32);
        Duration::from_secs_f64(exp_backoff.min(max))
    }
}

pub struct CongressClient {
    http: reqwest::Client,
    base_url: CongressURL,
    api_key: String,
    throttler: Arc<Throttler>,
    retry: RetryPolicy,
}

impl CongressClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: CongressURL,
        throttler: Arc<Throttler>,
    ) -> Result<Self, CongressApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CongressApiError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            throttler,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    /// GETs `path` as JSON, retrying transient failures with exponential backoff.
    #[tracing::instrument(name = "CongressClient::get", skip(self, params))]
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CongressApiError> {
        let mut attempt = 1;
        loop {
            match self.get_once(path, params).await {
                Ok(data) => return Ok(data),
                Err(err) if err.is_retryable() && attempt < self.retry.max_attempts => {
                    let backoff = self.retry.backoff(attempt);
                    tracing::warn!(
                        "Retrying {} (attempt {}/{}) after {:?}: {}",
                        path,
                        attempt + 1,
                        self.retry.max_attempts,
                        backoff,
                        err
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(&self, path: &str, params: &[(&str, String)]) -> Result<Value, CongressApiError> {
        let url = self.base_url.append_path(path);

        self.throttler.wait().await;
        tracing::debug!(url = url.as_ref(), ?params, "GET");

        let resp = self
            .http
            .get(url.as_ref())
            .query(params)
            .query(&[("api_key", self.api_key.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| CongressApiError::Request(e.to_string()))?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("Congress.gov API error {}: {}", status.as_u16(), body);
            return Err(CongressApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<Value>().await.map_err(|e| {
            CongressApiError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Collects every item of a paginated list endpoint.
    pub async fn paginate(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Vec<Value>, CongressApiError> {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let mut page_params = params.to_vec();
            page_params.push(("limit", PAGE_LIMIT.to_string()));
            page_params.push(("offset", offset.to_string()));

            let data = self.get(path, &page_params).await?;
            let page = read_page(&data, path)?;
            if page.items.is_empty() {
                break;
            }

            tracing::debug!(path, offset, count = page.items.len(), "Fetched page");
            items.extend(page.items);

            if !page.has_next {
                break;
            }
            offset += PAGE_LIMIT;
        }

        Ok(items)
    }

    pub async fn committees(
        &self,
        congress: u32,
        chamber: Chamber,
    ) -> Result<Vec<Value>, CongressApiError> {
        self.paginate("committee", &scope_params(congress, chamber))
            .await
    }

    pub async fn committee_meetings(
        &self,
        congress: u32,
        chamber: Chamber,
        meeting_type: MeetingType,
    ) -> Result<Vec<Value>, CongressApiError> {
        let mut params = scope_params(congress, chamber);
        if let Some(meeting_type) = meeting_type.as_filter() {
            params.push(("meetingType", meeting_type));
        }
        self.paginate("committee-meeting", &params).await
    }

    pub async fn committee_meeting_detail(
        &self,
        congress: u32,
        chamber: Chamber,
        event_id: &str,
    ) -> Result<Value, CongressApiError> {
        let path = format!("committee-meeting/{}/{}/{}", congress, chamber, event_id);
        let mut data = self.get(&path, &[]).await?;

        match data.get_mut("committeeMeeting").map(Value::take) {
            Some(detail) if !detail.is_null() => Ok(detail),
            _ => Err(CongressApiError::UnexpectedStructure(
                "Missing committeeMeeting in response".to_string(),
            )),
        }
    }

    pub async fn hearings(
        &self,
        congress: u32,
        chamber: Chamber,
        system_code: Option<&str>,
    ) -> Result<Vec<Value>, CongressApiError> {
        let mut params = scope_params(congress, chamber);
        if let Some(system_code) = system_code {
            params.push(("systemCode", system_code.to_string()));
        }
        self.paginate("committee-hearing", &params).await
    }
}

fn scope_params(congress: u32, chamber: Chamber) -> QueryParams {
    let mut params = vec![("congress", congress.to_string())];
    if let Some(chamber) = chamber.as_filter() {
        params.push(("chamber", chamber));
    }
    params
}

#[derive(Error, Debug)]
pub enum CongressApiError {
    #[error("RequestError: {0}")]
    Request(String),
    #[error("StatusError {status}: {body}")]
    Status { status: u16, body: String },
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("UnexpectedStructure: {0}")]
    UnexpectedStructure(String),
}

impl CongressApiError {
    /// Transport failures, throttling, server errors and garbled bodies are worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            CongressApiError::Request(_) | CongressApiError::Parsing(_) => true,
            CongressApiError::Status { status, .. } => *status == 429 || *status >= 500,
            CongressApiError::UnexpectedStructure(_) => false,
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub has_next: bool,
}

/// Extracts the items and the continuation flag from a list response.
pub fn read_page(data: &Value, path: &str) -> Result<Page, CongressApiError> {
    let collection = collection_keys(path)
        .iter()
        .find_map(|key| data.get(key).filter(|v| !v.is_null()))
        .ok_or_else(|| {
            CongressApiError::UnexpectedStructure(format!(
                "Unexpected response structure for {}",
                path
            ))
        })?;

    let items = match collection {
        Value::Object(map) => coerce_to_sequence(map.get("item")),
        other => coerce_to_sequence(Some(other)),
    };

    let has_next = has_link(collection.get("next"))
        || has_link(data.get("pagination").and_then(|p| p.get("next")));

    Ok(Page {
        items: items.into_iter().cloned().collect(),
        has_next,
    })
}

fn has_link(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    }
}

/// Response keys that may hold the list for `path`, most specific first.
fn collection_keys(path: &str) -> Vec<String> {
    let resource = path.rsplit('/').next().unwrap_or(path);

    let camel: String = resource
        .split('-')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    let tail = resource.rsplit('-').next().unwrap_or(resource);

    let mut keys = vec![
        format!("{}s", camel),
        format!("{}s", resource.replace('-', "")),
        format!("{}s", tail),
        "items".to_string(),
    ];
    keys.dedup();
    keys
}
