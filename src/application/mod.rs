//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Side effects (notifications, artifact rendering) are bounded and never
//! undo the primary state change.

pub mod handlers;
mod notifier;

pub use handlers::*;
pub use notifier::NotificationEmitter;
