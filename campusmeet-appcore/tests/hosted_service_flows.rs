use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campusmeet_appcore::call_service::HostedCallService;
use campusmeet_appcore::service::AppService;
use campusmeet_core::config::AppConfig;
use campusmeet_core::types::UserIdentity;
use campusmeet_engine::traits::{Clipboard, IdentityProvider, Navigator, Notifier};
use campusmeet_engine::workflow::{MSG_CREATE_FAILED, MSG_MEETING_CREATED, WorkflowState};
use chrono::{TimeZone, Utc};
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOIN_BASE: &str = "https://advising.example.edu";
const CALL_ID: &str = "7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c";

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

struct NullClipboard;

#[async_trait]
impl Clipboard for NullClipboard {
    async fn write_text(&self, _text: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

struct NullNavigator;

#[async_trait]
impl Navigator for NullNavigator {
    async fn go_to(&self, _path: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

struct SignedIn;

#[async_trait]
impl IdentityProvider for SignedIn {
    async fn current_user(&self) -> anyhow::Result<Option<UserIdentity>> {
        Ok(Some(UserIdentity::new("advisor-1")))
    }
}

fn app_service(
    dir: &tempfile::TempDir,
    api_base_url: &str,
    notifier: Arc<RecordingNotifier>,
) -> AppService {
    let svc = AppService::new(
        dir.path().join("config.json"),
        Arc::new(HostedCallService::new(api_base_url, "k")),
        Arc::new(SignedIn),
        notifier,
        Arc::new(NullClipboard),
        Arc::new(NullNavigator),
    );

    svc.save_config(&AppConfig {
        join_base_url: JOIN_BASE.into(),
        video_api_base_url: api_base_url.into(),
        api_key_present: true,
    })
    .unwrap();

    svc
}

#[tokio::test]
async fn instant_create_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/calls/[0-9a-f-]+$"))
        .and(header("x-api-key", "k"))
        .and(body_partial_json(serde_json::json!({
            "data": { "custom": { "description": "Instant Meeting" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(r#"{{"call":{{"id":"{CALL_ID}","starts_at":"2026-03-14T09:00:00Z"}}}}"#),
            "application/json",
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let svc = app_service(&dir, &server.uri(), notifier.clone());

    let workflow = svc.meeting_workflow().unwrap();
    workflow.open_instant().await;

    let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
    let out = workflow.submit_create(now).await;

    assert_eq!(out.state_label, "created");
    assert_eq!(
        out.join_link.as_deref(),
        Some(format!("{JOIN_BASE}/meeting/{CALL_ID}").as_str())
    );
    assert_eq!(
        notifier.messages.lock().unwrap().clone(),
        vec![MSG_MEETING_CREATED]
    );
}

#[tokio::test]
async fn rejected_create_keeps_the_flow_usable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/v1/calls/[0-9a-f-]+$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let svc = app_service(&dir, &server.uri(), notifier.clone());

    let workflow = svc.meeting_workflow().unwrap();
    workflow.open_instant().await;

    let out = workflow.submit_create(Utc::now()).await;

    assert_eq!(out.state_label, "instant_pending");
    let err = out.error.unwrap();
    assert!(err.contains("status=500"), "unexpected error: {err}");
    assert_eq!(workflow.state().await, WorkflowState::InstantPending);
    assert_eq!(
        notifier.messages.lock().unwrap().clone(),
        vec![MSG_CREATE_FAILED]
    );
}

#[tokio::test]
async fn upcoming_calls_feed_nearest_selection() {
    let server = MockServer::start().await;

    // Far-future fixtures: the dashboard query runs against the real clock.
    Mock::given(method("GET"))
        .and(path("/v1/calls"))
        .and(header("x-api-key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"calls":[
                {"id":"0a1b2c3d-4e5f-4a6b-8c9d-0e1f2a3b4c5d","starts_at":"2097-01-01T12:00:00Z"},
                {"id":"7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c","starts_at":"2096-01-01T12:00:00Z"},
                {"id":"1c9e7d5b-3a2f-4e8c-9d0a-b1c2d3e4f5a6"}
            ]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let svc = app_service(&dir, &server.uri(), Arc::new(RecordingNotifier::default()));

    let all = svc.upcoming_calls().await.unwrap();
    assert_eq!(all.len(), 3);

    let nearest = svc.nearest_upcoming_call().await.unwrap().unwrap();
    assert_eq!(nearest.id.to_string(), CALL_ID);
}
