use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The signed-in user as reported by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Read-only snapshot of a call as the hosted platform reports it.
///
/// The platform owns the call; this is a transient view held only for the
/// duration of a selection or creation flow. Participants and other platform
/// metadata are opaque and not modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: CallId,
    pub starts_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// Description used when a session is created without one.
pub const INSTANT_MEETING_DESCRIPTION: &str = "Instant Meeting";

/// Transient form state while the user composes a session.
///
/// Created when a creation/join dialog opens, discarded when it closes or the
/// submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MeetingDraft {
    pub starts_at: Option<DateTime<Utc>>,
    pub description: String,
    pub join_link_input: String,
}

impl MeetingDraft {
    pub fn effective_description(&self) -> &str {
        if self.description.trim().is_empty() {
            INSTANT_MEETING_DESCRIPTION
        } else {
            &self.description
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_id_displays_as_bare_uuid() {
        let id = CallId::new();
        assert_eq!(id.to_string(), id.0.to_string());
    }

    #[test]
    fn empty_description_falls_back_to_instant_meeting() {
        let draft = MeetingDraft::default();
        assert_eq!(draft.effective_description(), INSTANT_MEETING_DESCRIPTION);

        let draft = MeetingDraft {
            description: "   ".into(),
            ..Default::default()
        };
        assert_eq!(draft.effective_description(), INSTANT_MEETING_DESCRIPTION);

        let draft = MeetingDraft {
            description: "Advising check-in".into(),
            ..Default::default()
        };
        assert_eq!(draft.effective_description(), "Advising check-in");
    }
}
