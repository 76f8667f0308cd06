//! Bounded connection workers.
//!
//! Every accepted connection becomes one task in a pool of fixed capacity,
//! which caps inbound concurrency and keeps one misbehaving connection
//! from touching any other. The task body is the catch-all boundary of
//! the whole request cycle: nothing that happens inside a connection
//! escapes it.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::http::parser::{self, ParseError};
use crate::http::response::Response;
use crate::http::writer;
use crate::router::Router;

/// A bounded pool of concurrent connection tasks.
///
/// Submission waits for a free slot, which pushes back on the accept loop
/// when the pool is saturated. Shutdown is idempotent: it stops new
/// submissions and waits for running tasks to drain.
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
    open: AtomicBool,
}

impl WorkerPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
            open: AtomicBool::new(true),
        }
    }

    /// Runs `task` on a pool slot.
    ///
    /// After shutdown this logs and drops the task instead of failing;
    /// the listener never sees an error from a stopped pool.
    pub async fn submit<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if !self.open.load(Ordering::Acquire) {
            warn!("worker pool is shut down, dropping connection");
            return;
        }
        let permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("worker pool closed while waiting for a slot, dropping connection");
                return;
            }
        };
        tokio::spawn(async move {
            task.await;
            drop(permit);
        });
    }

    /// Stops the pool: no new tasks, running tasks finish.
    pub async fn shutdown(&self) {
        if !self.open.swap(false, Ordering::AcqRel) {
            return;
        }
        self.permits.close();
        while self.permits.available_permits() < self.capacity {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Free slots right now.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// The full life of one connection: parse, dispatch, respond, close.
///
/// Every failure is caught here and mapped to a best-effort error
/// response or a logged, silent close. The stream is closed on drop.
pub async fn serve_connection<S>(mut stream: S, peer: SocketAddr, router: Arc<Router>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut req = match parser::parse_request(&mut stream).await {
        Ok(req) => req,
        Err(e) if e.wants_bad_request() => {
            warn!(peer = %peer, error = %e, "rejecting malformed request");
            best_effort_send(Response::bad_request(), &mut stream).await;
            return;
        }
        Err(ParseError::ConnectionLost(e)) => {
            debug!(peer = %peer, error = %e, "connection lost while reading request");
            return;
        }
        Err(e) => {
            // HeaderTooLarge and TruncatedBody: drop without a response.
            warn!(peer = %peer, error = %e, "dropping connection");
            return;
        }
    };

    let response = match router.dispatch(&mut req) {
        Ok(response) => response,
        Err(e) => {
            error!(peer = %peer, path = %req.path, error = %e, "handler failed");
            Response::server_error()
        }
    };

    let status = response.status;
    match writer::send(response, &mut stream).await {
        Ok(()) => debug!(peer = %peer, path = %req.path, status = status.as_u16(), "served"),
        Err(e) => debug!(peer = %peer, error = %e, "connection lost while writing response"),
    }
}

async fn best_effort_send<S: AsyncWrite + Unpin>(response: Response, stream: &mut S) {
    if let Err(e) = writer::send(response, stream).await {
        debug!(error = %e, "could not deliver error response");
    }
}
