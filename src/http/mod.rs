//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.x subset spoken by the server: one
//! request and one response per connection, no pipelining, no chunked
//! transfer encoding.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`capped`**: A byte-capped reader bounding the header region of a request
//! - **`headers`**: Ordered header map and the header block parser
//! - **`request`**: HTTP request representation, methods and cookie parsing
//! - **`parser`**: Reads a connection's input bytes into a [`request::Request`]
//! - **`response`**: HTTP response representation with in-memory or file body
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection Lifecycle
//!
//! Every accepted connection serves exactly one request/response pair:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Parsing   │ ← Read request line, headers and body
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route table picks a handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Closed (a new request needs a new connection)
//! ```

pub mod capped;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// HTTP protocol versions.
///
/// Requests carry the version token as received; this enum is what the
/// server itself speaks. `Http20` is reserved: no parsing or dispatch
/// logic produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
    /// Reserved, not implemented.
    Http20,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Http10 => "HTTP/1.0",
            Version::Http11 => "HTTP/1.1",
            Version::Http20 => "HTTP/2.0",
        }
    }
}
