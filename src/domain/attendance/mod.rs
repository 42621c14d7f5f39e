//! Attendance domain module.
//!
//! - `attendance` - Attendance record
//! - `policy` - Ticket handling when an attendee leaves
//! - `errors` - AttendanceError

mod attendance;
mod errors;
mod policy;

pub use attendance::Attendance;
pub use errors::AttendanceError;
pub use policy::{LeavePolicy, LEFT_EVENT_REVOKE_REASON};
