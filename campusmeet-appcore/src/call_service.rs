use async_trait::async_trait;
use campusmeet_core::types::{CallId, CallRecord};
use campusmeet_engine::traits::CallService;
use campusmeet_providers::calls::{
    VideoApiConfig, build_create_call_request, build_upcoming_calls_request,
};
use campusmeet_providers::parse::{parse_call, parse_call_list};
use campusmeet_providers::runtime;
use chrono::{DateTime, Utc};

/// `CallService` over the hosted video platform's HTTP API.
#[derive(Debug, Clone)]
pub struct HostedCallService {
    cfg: VideoApiConfig,
}

impl HostedCallService {
    pub fn new(api_base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            cfg: VideoApiConfig {
                api_base_url: api_base_url.into(),
                api_key: api_key.into(),
            },
        }
    }
}

fn check_status(resp: &runtime::HttpResponse) -> anyhow::Result<()> {
    if (200..=299).contains(&resp.status) {
        return Ok(());
    }

    Err(anyhow::anyhow!(
        "call service request failed: status={} body={}",
        resp.status,
        String::from_utf8_lossy(&resp.body)
    ))
}

#[async_trait]
impl CallService for HostedCallService {
    async fn create_or_get(
        &self,
        id: &CallId,
        starts_at: DateTime<Utc>,
        description: &str,
    ) -> anyhow::Result<CallRecord> {
        let req = build_create_call_request(&self.cfg, id, starts_at, description);
        let resp = runtime::execute(&req).await?;
        check_status(&resp)?;
        parse_call(&resp.body)
    }

    async fn upcoming_calls(&self) -> anyhow::Result<Vec<CallRecord>> {
        let req = build_upcoming_calls_request(&self.cfg, Utc::now());
        let resp = runtime::execute(&req).await?;
        check_status(&resp)?;
        parse_call_list(&resp.body)
    }
}
