//! Server Module
//!
//! The sequential connection loop: accept, read, dispatch, write, close.
//!
//! # Components
//! - Connection: reads one request and writes one response
//! - Listener: accepts connections one at a time until shutdown

mod connection;
mod listener;

pub use connection::{handle_connection, read_request};
pub use listener::serve;
