//! Port abstraction for the notification inbox store.
//!
//! Every operation is scoped to a recipient so one user can never read or
//! flip another user's notifications.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification repository adapters.
    pub enum NotificationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// The recipient's most recent notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Number of unread notifications for the recipient.
    async fn count_unread(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError>;

    /// Mark one of the recipient's notifications read. Returns `false` when
    /// no notification with this id belongs to the recipient.
    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<bool, NotificationRepositoryError>;

    /// Mark every unread notification of the recipient read and return how
    /// many changed.
    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, NotificationRepositoryError>;
}

/// Empty inbox.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
        _limit: u32,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_unread(&self, _user_id: &UserId) -> Result<u64, NotificationRepositoryError> {
        Ok(0)
    }

    async fn mark_read(
        &self,
        _user_id: &UserId,
        _id: &NotificationId,
    ) -> Result<bool, NotificationRepositoryError> {
        Ok(false)
    }

    async fn mark_all_read(&self, _user_id: &UserId) -> Result<u64, NotificationRepositoryError> {
        Ok(0)
    }
}
