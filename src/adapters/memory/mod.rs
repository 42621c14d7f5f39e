//! In-memory adapters for tests and database-free local runs.

mod renderer;
mod store;

pub use renderer::RecordingTicketRenderer;
pub use store::InMemoryStore;
