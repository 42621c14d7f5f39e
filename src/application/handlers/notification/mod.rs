//! Notification inbox handlers.

mod delete_notification;
mod list_notifications;

pub use delete_notification::{DeleteNotificationCommand, DeleteNotificationHandler};
pub use list_notifications::ListNotificationsHandler;
