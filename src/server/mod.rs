//! Connection acceptance and execution.

pub mod listener;
pub mod worker;

pub use listener::{BoxedConn, Conn, DEFAULT_PORT, DEFAULT_SECURE_PORT, Server, StreamWrapper};
pub use worker::WorkerPool;
