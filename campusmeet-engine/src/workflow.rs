use std::sync::Arc;

use campusmeet_core::link::{format_starts_at, join_link};
use campusmeet_core::types::{CallId, MeetingDraft};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::traits::{CallService, Clipboard, IdentityProvider, Navigator, Notifier};

pub const MSG_SELECT_DATE_TIME: &str = "Please select a date and time";
pub const MSG_MEETING_CREATED: &str = "Meeting created";
pub const MSG_CREATE_FAILED: &str = "Failed to create meeting";
pub const MSG_LINK_COPIED: &str = "Link copied";
pub const MSG_ENTER_LINK: &str = "Please enter a meeting link";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no start time selected")]
    MissingStartTime,
    #[error("no meeting link entered")]
    MissingJoinLink,
}

/// Which dialog, if any, is in front of the user.
///
/// A single discriminator: "which mode is active" and "is anything shown"
/// cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkflowState {
    Idle,
    Scheduling,
    Joining,
    InstantPending,
    Created {
        call_id: CallId,
        join_link: String,
        starts_at_label: String,
    },
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::Idle
    }
}

impl WorkflowState {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Scheduling => "scheduling",
            WorkflowState::Joining => "joining",
            WorkflowState::InstantPending => "instant_pending",
            WorkflowState::Created { .. } => "created",
        }
    }
}

/// Snapshot for a front end to render from.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStatus {
    pub state_label: String,
    pub is_open: bool,
    pub create_in_flight: bool,
    pub join_link: Option<String>,
    pub starts_at_label: Option<String>,
}

/// Result of a user-triggered action: a stable state label plus an optional
/// user-facing error, so front ends never have to inspect the state enum.
#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    pub state_label: String,
    pub join_link: Option<String>,
    pub error: Option<String>,
}

#[derive(Default)]
struct Inner {
    state: WorkflowState,
    draft: MeetingDraft,

    // Guards against double submission while a create request is pending.
    create_in_flight: bool,

    // Bumped on close; a create request finishing against a stale epoch is
    // discarded instead of resurrecting a dismissed dialog.
    epoch: u64,
}

/// Drives the meeting creation/join/instant flows as one mutually-exclusive
/// state machine. One logical actor per instance: transitions happen on
/// discrete user events, creation suspends the triggering action only.
#[derive(Clone)]
pub struct MeetingWorkflow {
    join_base_url: String,
    calls: Arc<dyn CallService>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    clipboard: Arc<dyn Clipboard>,
    navigator: Arc<dyn Navigator>,
    inner: Arc<Mutex<Inner>>,
}

impl MeetingWorkflow {
    pub fn new(
        join_base_url: impl Into<String>,
        calls: Arc<dyn CallService>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            join_base_url: join_base_url.into(),
            calls,
            identity,
            notifier,
            clipboard,
            navigator,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub async fn state(&self) -> WorkflowState {
        self.inner.lock().await.state.clone()
    }

    pub async fn draft(&self) -> MeetingDraft {
        self.inner.lock().await.draft.clone()
    }

    pub async fn status(&self) -> WorkflowStatus {
        let inner = self.inner.lock().await;
        let (join_link, starts_at_label) = match &inner.state {
            WorkflowState::Created {
                join_link,
                starts_at_label,
                ..
            } => (Some(join_link.clone()), Some(starts_at_label.clone())),
            _ => (None, None),
        };

        WorkflowStatus {
            state_label: inner.state.label().into(),
            is_open: !matches!(inner.state, WorkflowState::Idle),
            create_in_flight: inner.create_in_flight,
            join_link,
            starts_at_label,
        }
    }

    /// Opens the scheduling dialog. The form pre-fills the current instant;
    /// the user may clear or change it.
    pub async fn open_scheduling(&self, now: DateTime<Utc>) {
        let mut inner = self.inner.lock().await;
        if !matches!(inner.state, WorkflowState::Idle) {
            return;
        }
        inner.state = WorkflowState::Scheduling;
        inner.draft = MeetingDraft {
            starts_at: Some(now),
            ..Default::default()
        };
    }

    pub async fn open_joining(&self) {
        let mut inner = self.inner.lock().await;
        if !matches!(inner.state, WorkflowState::Idle) {
            return;
        }
        inner.state = WorkflowState::Joining;
        inner.draft = MeetingDraft::default();
    }

    pub async fn open_instant(&self) {
        let mut inner = self.inner.lock().await;
        if !matches!(inner.state, WorkflowState::Idle) {
            return;
        }
        inner.state = WorkflowState::InstantPending;
        inner.draft = MeetingDraft::default();
    }

    /// Dismisses whatever is open. Clears the draft and any created-call
    /// details: reopening always shows the creation form, never a stale
    /// confirmation.
    pub async fn close(&self) {
        let mut inner = self.inner.lock().await;
        inner.state = WorkflowState::Idle;
        inner.draft = MeetingDraft::default();
        inner.create_in_flight = false;
        inner.epoch = inner.epoch.wrapping_add(1);
    }

    pub async fn set_starts_at(&self, starts_at: Option<DateTime<Utc>>) {
        self.inner.lock().await.draft.starts_at = starts_at;
    }

    pub async fn set_description(&self, description: impl Into<String>) {
        self.inner.lock().await.draft.description = description.into();
    }

    pub async fn set_join_link_input(&self, link: impl Into<String>) {
        self.inner.lock().await.draft.join_link_input = link.into();
    }

    /// Creates the session with the hosted platform. Valid from `Scheduling`
    /// and `InstantPending`; a failed attempt leaves the state untouched and
    /// is never retried automatically.
    pub async fn submit_create(&self, now: DateTime<Utc>) -> ActionOutcome {
        let (starts_at, description, epoch) = {
            let mut inner = self.inner.lock().await;

            match inner.state {
                WorkflowState::Scheduling | WorkflowState::InstantPending => {}
                _ => return outcome(&inner, Some("not in a creation flow".into())),
            }

            if inner.create_in_flight {
                return outcome(&inner, Some("creation already in progress".into()));
            }

            let starts_at = match (&inner.state, inner.draft.starts_at) {
                // The scheduling form requires an explicit start time.
                (WorkflowState::Scheduling, None) => {
                    self.notifier.notify(MSG_SELECT_DATE_TIME);
                    return outcome(&inner, Some(WorkflowError::MissingStartTime.to_string()));
                }
                (_, Some(t)) => t,
                // Instant meetings start at submission time.
                (_, None) => now,
            };

            inner.create_in_flight = true;
            (
                starts_at,
                inner.draft.effective_description().to_string(),
                inner.epoch,
            )
        };

        // Not an error: the auth layer simply has not produced a user yet.
        let user = match self.identity.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) | Err(_) => {
                log::debug!("create skipped: no authenticated user");
                let mut inner = self.inner.lock().await;
                inner.create_in_flight = false;
                return outcome(&inner, None);
            }
        };

        let id = CallId::new();
        log::info!(
            "creating call {id} for user {} starting {starts_at}",
            user.id
        );

        match self.calls.create_or_get(&id, starts_at, &description).await {
            Ok(record) => {
                let mut inner = self.inner.lock().await;
                inner.create_in_flight = false;

                if inner.epoch != epoch {
                    // The dialog was closed while the request was in flight;
                    // the user has moved on, so the result is dropped.
                    log::info!("discarding call {} created after close", record.id);
                    return outcome(&inner, None);
                }

                let link = join_link(&self.join_base_url, &record.id);
                inner.state = WorkflowState::Created {
                    call_id: record.id,
                    join_link: link.clone(),
                    starts_at_label: format_starts_at(starts_at),
                };
                inner.draft = MeetingDraft::default();
                drop(inner);

                self.notifier.notify(MSG_MEETING_CREATED);
                ActionOutcome {
                    state_label: "created".into(),
                    join_link: Some(link),
                    error: None,
                }
            }
            Err(e) => {
                log::error!("call creation failed: {e:#}");
                let mut inner = self.inner.lock().await;
                inner.create_in_flight = false;
                if inner.epoch == epoch {
                    self.notifier.notify(MSG_CREATE_FAILED);
                }
                outcome(&inner, Some(e.to_string()))
            }
        }
    }

    /// Copies the join link of the created session. Clipboard failures are
    /// logged but not surfaced.
    pub async fn copy_join_link(&self) -> ActionOutcome {
        let link = {
            let inner = self.inner.lock().await;
            match &inner.state {
                WorkflowState::Created { join_link, .. } => join_link.clone(),
                _ => return outcome(&inner, Some("no created meeting to copy".into())),
            }
        };

        if let Err(e) = self.clipboard.write_text(&link).await {
            log::warn!("clipboard write failed: {e:#}");
        }
        self.notifier.notify(MSG_LINK_COPIED);

        ActionOutcome {
            state_label: "created".into(),
            join_link: Some(link),
            error: None,
        }
    }

    /// Hands the user-typed link to the router verbatim and resets the
    /// workflow; joining is terminal as far as this state machine goes.
    pub async fn submit_join(&self) -> ActionOutcome {
        let target = {
            let inner = self.inner.lock().await;
            if !matches!(inner.state, WorkflowState::Joining) {
                return outcome(&inner, Some("not in the join flow".into()));
            }

            let target = inner.draft.join_link_input.trim().to_string();
            if target.is_empty() {
                self.notifier.notify(MSG_ENTER_LINK);
                return outcome(&inner, Some(WorkflowError::MissingJoinLink.to_string()));
            }
            target
        };

        if let Err(e) = self.navigator.go_to(&target).await {
            log::error!("navigation to meeting link failed: {e:#}");
            let inner = self.inner.lock().await;
            return outcome(&inner, Some(e.to_string()));
        }

        self.close().await;
        ActionOutcome {
            state_label: "idle".into(),
            join_link: None,
            error: None,
        }
    }
}

fn outcome(inner: &Inner, error: Option<String>) -> ActionOutcome {
    let join_link = match &inner.state {
        WorkflowState::Created { join_link, .. } => Some(join_link.clone()),
        _ => None,
    };

    ActionOutcome {
        state_label: inner.state.label().into(),
        join_link,
        error,
    }
}
