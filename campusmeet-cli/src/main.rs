use std::sync::Arc;

use campusmeet_appcore::call_service::HostedCallService;
use campusmeet_core::schedule::nearest_upcoming_call;
use campusmeet_core::types::{CallId, CallRecord, UserIdentity};
use campusmeet_engine::traits::{
    CallService, Clipboard, IdentityProvider, Navigator, Notifier,
};
use campusmeet_engine::workflow::MeetingWorkflow;
use chrono::{DateTime, Duration, Utc};

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, message: &str) {
        println!("[toast] {message}");
    }
}

struct StdoutClipboard;

#[async_trait::async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        println!("[clipboard] {text}");
        Ok(())
    }
}

struct StdoutNavigator;

#[async_trait::async_trait]
impl Navigator for StdoutNavigator {
    async fn go_to(&self, path: &str) -> anyhow::Result<()> {
        println!("[navigate] {path}");
        Ok(())
    }
}

struct StaticIdentity;

#[async_trait::async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> anyhow::Result<Option<UserIdentity>> {
        Ok(Some(
            UserIdentity::new("advisor-demo").with_display_name("Demo Advisor"),
        ))
    }
}

/// Offline stand-in for the hosted platform: echoes creations back and serves
/// a small upcoming-calls fixture.
struct InMemoryCallService;

#[async_trait::async_trait]
impl CallService for InMemoryCallService {
    async fn create_or_get(
        &self,
        id: &CallId,
        starts_at: DateTime<Utc>,
        description: &str,
    ) -> anyhow::Result<CallRecord> {
        Ok(CallRecord {
            id: id.clone(),
            starts_at: Some(starts_at),
            description: Some(description.to_string()),
        })
    }

    async fn upcoming_calls(&self) -> anyhow::Result<Vec<CallRecord>> {
        let now = Utc::now();
        Ok(vec![
            CallRecord {
                id: CallId::new(),
                starts_at: Some(now + Duration::hours(4)),
                description: Some("Course selection".into()),
            },
            CallRecord {
                id: CallId::new(),
                starts_at: Some(now + Duration::minutes(30)),
                description: Some("Advising check-in".into()),
            },
            CallRecord {
                id: CallId::new(),
                starts_at: None,
                description: Some("Instant Meeting".into()),
            },
        ])
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Demo behavior: run the instant-meeting flow end to end, then show the
    // nearest-upcoming selection over the dashboard collection. Set
    // CAMPUSMEET_API_BASE_URL and CAMPUSMEET_API_KEY to go against the real
    // hosted platform instead of the in-memory stand-in.

    let join_base_url = std::env::var("CAMPUSMEET_JOIN_BASE_URL")
        .unwrap_or_else(|_| "https://advising.example.edu".into());

    let calls: Arc<dyn CallService> = match std::env::var("CAMPUSMEET_API_BASE_URL") {
        Ok(api_base_url) => {
            let api_key = std::env::var("CAMPUSMEET_API_KEY").unwrap_or_default();
            log::info!("using hosted call service at {api_base_url}");
            Arc::new(HostedCallService::new(api_base_url, api_key))
        }
        Err(_) => Arc::new(InMemoryCallService),
    };

    let workflow = MeetingWorkflow::new(
        join_base_url,
        calls.clone(),
        Arc::new(StaticIdentity),
        Arc::new(StdoutNotifier),
        Arc::new(StdoutClipboard),
        Arc::new(StdoutNavigator),
    );

    workflow.open_instant().await;
    let out = workflow.submit_create(Utc::now()).await;
    println!("create: state={} error={:?}", out.state_label, out.error);

    if out.error.is_none() {
        workflow.copy_join_link().await;
    }
    workflow.close().await;

    let upcoming = calls.upcoming_calls().await?;
    match nearest_upcoming_call(&upcoming, Utc::now()) {
        Some(call) => println!(
            "next session: {} at {:?}",
            call.description.as_deref().unwrap_or("(untitled)"),
            call.starts_at
        ),
        None => println!("no upcoming sessions"),
    }

    Ok(())
}
