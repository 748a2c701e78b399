use crate::request::{Body, HttpRequest};
use campusmeet_core::types::CallId;
use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Clone, PartialEq, Eq)]
pub struct VideoApiConfig {
    pub api_base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for VideoApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoApiConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

fn api_url(cfg: &VideoApiConfig, path: &str) -> String {
    format!("{}{}", cfg.api_base_url.trim_end_matches('/'), path)
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Create-or-get a call. Posting an id that already exists returns the
/// existing call unchanged, so the operation is safe to repeat.
pub fn build_create_call_request(
    cfg: &VideoApiConfig,
    id: &CallId,
    starts_at: DateTime<Utc>,
    description: &str,
) -> HttpRequest {
    let body = serde_json::json!({
        "data": {
            "starts_at": rfc3339(starts_at),
            "custom": { "description": description },
        }
    });

    HttpRequest {
        method: "POST".into(),
        url: api_url(cfg, &format!("/v1/calls/{id}")),
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Accept".into(), "application/json".into()),
            ("x-api-key".into(), cfg.api_key.clone()),
        ],
        body: Body::Json(body.to_string()),
    }
}

/// Calls scheduled to start after the given instant, soonest first.
pub fn build_upcoming_calls_request(
    cfg: &VideoApiConfig,
    starts_after: DateTime<Utc>,
) -> HttpRequest {
    HttpRequest {
        method: "GET".into(),
        url: api_url(cfg, &format!("/v1/calls?starts_after={}", rfc3339(starts_after))),
        headers: vec![
            ("Accept".into(), "application/json".into()),
            ("x-api-key".into(), cfg.api_key.clone()),
        ],
        body: Body::Empty,
    }
}
