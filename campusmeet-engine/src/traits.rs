use async_trait::async_trait;
use campusmeet_core::types::{CallId, CallRecord, UserIdentity};
use chrono::{DateTime, Utc};

/// The hosted video platform. Owns every call; the workflow only ever holds
/// transient read-only records.
#[async_trait]
pub trait CallService: Send + Sync {
    /// Creates the call if it does not exist yet; an existing id returns the
    /// current platform record unchanged.
    async fn create_or_get(
        &self,
        id: &CallId,
        starts_at: DateTime<Utc>,
        description: &str,
    ) -> anyhow::Result<CallRecord>;

    async fn upcoming_calls(&self) -> anyhow::Result<Vec<CallRecord>>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `None` means no signed-in user; call creation must not be attempted.
    async fn current_user(&self) -> anyhow::Result<Option<UserIdentity>>;
}

/// Fire-and-forget user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Best-effort system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Hands a target over to the host application's router. The target is the
/// user's input verbatim; the workflow does not vet its shape.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn go_to(&self, path: &str) -> anyhow::Result<()>;
}
