//! HTTP adapter for attendance endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::attendance_router;
