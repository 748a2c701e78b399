use std::path::PathBuf;
use std::sync::Arc;

use campusmeet_core::config::AppConfig;
use campusmeet_core::schedule::nearest_upcoming_call;
use campusmeet_core::types::CallRecord;
use campusmeet_engine::traits::{CallService, Clipboard, IdentityProvider, Navigator, Notifier};
use campusmeet_engine::workflow::MeetingWorkflow;
use chrono::Utc;

use crate::config_store::ConfigStore;

/// Maps a raw service error onto something a student can act on.
pub fn user_facing_call_error(e: &anyhow::Error) -> String {
    let raw = format!("{e:#}");

    // Keep messages actionable and short; details are in logs.
    if raw.contains("status=401") || raw.contains("status=403") {
        return "The video service rejected the request. Check the API key in Settings.".into();
    }

    if raw.contains("timed out") || raw.contains("http request failed") {
        return "Could not reach the video service. Check your connection and try again.".into();
    }

    "Something went wrong creating the session. Try again.".into()
}

/// Facade the front ends talk to: owns the config store and the collaborator
/// handles, hands out workflows, and answers dashboard queries.
#[derive(Clone)]
pub struct AppService {
    config_store: ConfigStore,
    calls: Arc<dyn CallService>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
    navigator: Arc<dyn Navigator>,
}

impl AppService {
    pub fn new(
        config_path: PathBuf,
        calls: Arc<dyn CallService>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config_store: ConfigStore::at_path(config_path),
            calls,
            identity,
            notifier,
            clipboard,
            navigator,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        self.config_store.load()
    }

    pub fn save_config(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        self.config_store.save(cfg)
    }

    /// A fresh workflow bound to the configured join-link base.
    pub fn meeting_workflow(&self) -> anyhow::Result<MeetingWorkflow> {
        let cfg = self.load_config()?;
        Ok(MeetingWorkflow::new(
            cfg.join_base_url,
            self.calls.clone(),
            self.identity.clone(),
            self.notifier.clone(),
            self.clipboard.clone(),
            self.navigator.clone(),
        ))
    }

    pub async fn upcoming_calls(&self) -> anyhow::Result<Vec<CallRecord>> {
        let calls = self.calls.upcoming_calls().await?;
        log::debug!("dashboard refresh: {} upcoming calls", calls.len());
        Ok(calls)
    }

    /// The call starting soonest from now, if any. Evaluated afresh per
    /// invocation; dashboards poll this on their own refresh cadence.
    pub async fn nearest_upcoming_call(&self) -> anyhow::Result<Option<CallRecord>> {
        let calls = self.upcoming_calls().await?;
        Ok(nearest_upcoming_call(&calls, Utc::now()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failures_point_at_the_api_key() {
        let e = anyhow::anyhow!("call service request failed: status=401 body=denied");
        assert!(user_facing_call_error(&e).contains("API key"));
    }

    #[test]
    fn transport_failures_point_at_the_connection() {
        let e = anyhow::anyhow!("http request failed");
        assert!(user_facing_call_error(&e).contains("connection"));
    }

    #[test]
    fn other_failures_fall_back_to_a_generic_message() {
        let e = anyhow::anyhow!("decode call JSON");
        assert!(user_facing_call_error(&e).contains("Try again"));
    }
}
