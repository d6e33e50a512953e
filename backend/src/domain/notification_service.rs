//! Notification inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{NotificationInbox, NotificationRepository, NotificationRepositoryError};
use crate::domain::{Error, Identity, NotificationFeed, NotificationId};

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Implements [`NotificationInbox`].
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationService<N> {
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

fn map_notification_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list(&self, identity: Identity, limit: u32) -> Result<NotificationFeed, Error> {
        let user_id = identity.user_id();
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let items = self
            .notifications
            .list_for_user(&user_id, limit)
            .await
            .map_err(map_notification_error)?;
        let unread = self
            .notifications
            .count_unread(&user_id)
            .await
            .map_err(map_notification_error)?;
        Ok(NotificationFeed { items, unread })
    }

    async fn mark_read(&self, identity: Identity, id: NotificationId) -> Result<(), Error> {
        let user_id = identity.user_id();
        let found = self
            .notifications
            .mark_read(&user_id, &id)
            .await
            .map_err(map_notification_error)?;
        if !found {
            debug!(%user_id, notification_id = %id, "notification not found for recipient");
            return Err(Error::not_found("Notification not found"));
        }
        Ok(())
    }

    async fn mark_all_read(&self, identity: Identity) -> Result<u64, Error> {
        self.notifications
            .mark_all_read(&identity.user_id())
            .await
            .map_err(map_notification_error)
    }
}
