//! HTTP adapter for ticket endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::ticket_router;
