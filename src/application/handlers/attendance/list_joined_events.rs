//! ListJoinedEventsHandler - events the caller is attending.

use std::sync::Arc;

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::UserId;
use crate::ports::{AttendanceRepository, JoinedEventView};

pub struct ListJoinedEventsHandler {
    attendance: Arc<dyn AttendanceRepository>,
}

impl ListJoinedEventsHandler {
    pub fn new(attendance: Arc<dyn AttendanceRepository>) -> Self {
        Self { attendance }
    }

    /// Most recently joined first.
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<JoinedEventView>, AttendanceError> {
        Ok(self.attendance.list_joined_events(user_id).await?)
    }
}
