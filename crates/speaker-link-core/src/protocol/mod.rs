//! Protocol layer for the speaker backend.
//!
//! This module builds requests for the backend's HTTP endpoints and parses
//! their replies. It performs no I/O.

pub mod address;
pub mod requests;
pub mod response;

pub use address::validate_address;
pub use requests::{ApiReply, ApiRequest, Method};
