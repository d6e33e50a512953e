//! Driving port for a user's notification inbox.

use async_trait::async_trait;

use crate::domain::{Error, Identity, NotificationFeed, NotificationId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Newest notifications of the caller plus their unread total.
    async fn list(&self, identity: Identity, limit: u32) -> Result<NotificationFeed, Error>;

    /// Mark one of the caller's notifications read. Unknown ids and other
    /// users' notifications are both reported as not found.
    async fn mark_read(&self, identity: Identity, id: NotificationId) -> Result<(), Error>;

    /// Mark every unread notification of the caller read.
    async fn mark_all_read(&self, identity: Identity) -> Result<u64, Error>;
}
