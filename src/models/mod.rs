//! Request and Response models for the static content server
//!
//! The request side is just the request line; the response side is the
//! status line, fixed header set and body written back to the client.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{Method, RequestLine};
pub use response::{Response, Status};
