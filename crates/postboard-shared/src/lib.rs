//! # Postboard Shared
//!
//! Request and response bodies of the HTTP API, and the error body every
//! failing request carries.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
