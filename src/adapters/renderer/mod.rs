//! Ticket renderer adapters backed by external services.

mod http_renderer;

pub use http_renderer::{HttpRendererConfig, HttpTicketRenderer, QR_PAYLOAD_TYPE};
