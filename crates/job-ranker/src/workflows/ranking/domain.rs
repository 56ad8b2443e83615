use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Posting record as delivered by the scraping provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPosting {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub work_type: String,
    pub job_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

/// A posting that passed field validation, along with the rubric outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPosting {
    pub posting: RawPosting,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Externally visible shape of a ranked posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOutput {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub work_type: String,
    pub ranking: u32,
    pub reasons: Vec<String>,
    pub job_url: String,
}

impl From<ScoredPosting> for RankedOutput {
    fn from(scored: ScoredPosting) -> Self {
        let ScoredPosting {
            posting,
            score,
            reasons,
        } = scored;

        Self {
            title: posting.title,
            company_name: posting.company_name,
            location: posting.location,
            work_type: posting.work_type,
            ranking: score,
            reasons,
            job_url: posting.job_url,
        }
    }
}

/// Experience filter codes accepted by the provider, either one code or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceLevel {
    Single(String),
    Multiple(Vec<String>),
}

impl ExperienceLevel {
    pub fn codes(&self) -> Vec<&str> {
        match self {
            ExperienceLevel::Single(code) => vec![code.as_str()],
            ExperienceLevel::Multiple(codes) => codes.iter().map(String::as_str).collect(),
        }
    }

    fn is_blank(&self) -> bool {
        self.codes().iter().all(|code| code.trim().is_empty())
    }
}

/// Network routing options passed through to the provider untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyOptions {
    pub use_apify_proxy: bool,
    #[serde(default)]
    pub apify_proxy_groups: Vec<String>,
}

/// Request descriptor handed to the acquisition source for a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub work_type: String,
    pub rows: u32,
    pub experience_level: ExperienceLevel,
    pub published_at: String,
    pub title: String,
    pub proxy: ProxyOptions,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            work_type: "3".to_string(),
            rows: 10,
            experience_level: ExperienceLevel::Single("1".to_string()),
            published_at: "r86400".to_string(),
            title: "software engineer".to_string(),
            proxy: ProxyOptions {
                use_apify_proxy: true,
                apify_proxy_groups: vec!["RESIDENTIAL".to_string()],
            },
        }
    }
}

impl SearchRequest {
    /// Reject descriptors the provider would refuse before any network call happens.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.title.trim().is_empty() {
            return Err(RequestError::BlankField("title"));
        }
        if self.work_type.trim().is_empty() {
            return Err(RequestError::BlankField("workType"));
        }
        if self.rows == 0 {
            return Err(RequestError::ZeroRows);
        }
        if self.experience_level.is_blank() {
            return Err(RequestError::BlankField("experienceLevel"));
        }
        self.recency_window()?;
        if self.proxy.use_apify_proxy
            && self
                .proxy
                .apify_proxy_groups
                .iter()
                .all(|group| group.trim().is_empty())
        {
            return Err(RequestError::MissingProxyGroups);
        }
        Ok(())
    }

    /// Parse the `r<seconds>` recency code into a duration.
    pub fn recency_window(&self) -> Result<Duration, RequestError> {
        parse_recency(&self.published_at)
    }
}

pub(crate) fn parse_recency(raw: &str) -> Result<Duration, RequestError> {
    let invalid = || RequestError::InvalidRecency(raw.to_string());
    let seconds = raw
        .trim()
        .strip_prefix('r')
        .ok_or_else(invalid)?
        .parse::<i64>()
        .map_err(|_| invalid())?;

    if seconds <= 0 {
        return Err(invalid());
    }

    Duration::try_seconds(seconds).ok_or_else(invalid)
}

/// Descriptor validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("search request field `{0}` must not be blank")]
    BlankField(&'static str),
    #[error("search request must ask for at least one row")]
    ZeroRows,
    #[error("recency window '{0}' must look like r<seconds>")]
    InvalidRecency(String),
    #[error("proxy is enabled but no proxy groups were given")]
    MissingProxyGroups,
}
