use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;
use crate::TargetKind;

/// Remote vote service endpoint and HTTP transport parameters
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every vote path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection segment for questions, `{base_url}/{question_path}/{id}/vote`
    #[serde(default = "default_question_path")]
    pub question_path: String,

    /// Collection segment for answers, `{base_url}/{answer_path}/{id}/vote`
    #[serde(default = "default_answer_path")]
    pub answer_path: String,

    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Per-request HTTP timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            question_path: default_question_path(),
            answer_path: default_answer_path(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }

        for (name, segment) in [
            ("api.question_path", &self.question_path),
            ("api.answer_path", &self.answer_path),
        ] {
            if segment.is_empty() || segment.contains('/') {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a single non-empty path segment, got {:?}",
                    name, segment
                )));
            }
        }

        if self.connect_timeout_ms == 0 || self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "api timeouts must be at least 1ms".into(),
            ));
        }

        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// `{base_url}/{collection}/{id}/vote`
    pub fn vote_url(
        &self,
        kind: TargetKind,
        id: u64,
    ) -> String {
        let collection = match kind {
            TargetKind::Question => &self.question_path,
            TargetKind::Answer => &self.answer_path,
        };
        format!(
            "{}/{}/{}/vote",
            self.base_url.trim_end_matches('/'),
            collection,
            id
        )
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_question_path() -> String {
    "perguntas".to_string()
}
fn default_answer_path() -> String {
    "respostas".to_string()
}
fn default_connect_timeout_ms() -> u64 {
    1000
}
fn default_request_timeout_ms() -> u64 {
    3000
}
fn default_user_agent() -> String {
    concat!("vote-sync/", env!("CARGO_PKG_VERSION")).to_string()
}
