use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::router::Router;
use crate::server::worker::{self, WorkerPool};

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_SECURE_PORT: u16 = 443;

/// What a worker needs from a connection stream.
pub trait Conn: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Conn for T {}

pub type BoxedConn = Box<dyn Conn>;

/// Wraps an accepted TCP stream before it reaches a worker.
///
/// This is the TLS seam: a TLS implementation performs its handshake here
/// and hands back the wrapped stream. The engine itself only ever sees
/// something that reads and writes.
pub type StreamWrapper = Arc<
    dyn Fn(TcpStream) -> Pin<Box<dyn Future<Output = io::Result<BoxedConn>> + Send>>
        + Send
        + Sync,
>;

/// Owns the bound socket and the worker pool.
pub struct Server {
    listener: TcpListener,
    tls: bool,
    wrapper: Option<StreamWrapper>,
    pool: WorkerPool,
    shutdown: Notify,
}

impl Server {
    /// Binds the listening socket on the configured port.
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let port = config.effective_port();
        let listener = TcpListener::bind(("0.0.0.0", port)).await?;
        info!(addr = %listener.local_addr()?, "listener bound");
        Ok(Self {
            listener,
            tls: config.tls,
            wrapper: None,
            pool: WorkerPool::new(config.max_workers),
            shutdown: Notify::new(),
        })
    }

    /// Installs the stream wrapper used for TLS.
    pub fn with_stream_wrapper(mut self, wrapper: StreamWrapper) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until [`Server::stop`] is called.
    ///
    /// Each accepted connection is submitted to the worker pool. Accept
    /// failures are logged and the loop continues; the shutdown signal
    /// exits it, then the pool drains before this returns.
    pub async fn run(&self, router: Arc<Router>) -> anyhow::Result<()> {
        if self.tls && self.wrapper.is_none() {
            anyhow::bail!("TLS requested but no stream wrapper is installed");
        }
        info!("accepting connections");
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("shutdown requested, listener closing");
                    break;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((socket, peer)) => {
                            debug!(peer = %peer, "accepted connection");
                            let router = router.clone();
                            let wrapper = self.wrapper.clone();
                            self.pool.submit(async move {
                                let stream: BoxedConn = match wrapper {
                                    Some(wrap) => match wrap(socket).await {
                                        Ok(stream) => stream,
                                        Err(e) => {
                                            warn!(peer = %peer, error = %e, "stream wrapping failed");
                                            return;
                                        }
                                    },
                                    None => Box::new(socket),
                                };
                                worker::serve_connection(stream, peer, router).await;
                            }).await;
                        }
                        Err(e) => error!(error = %e, "accept failed"),
                    }
                }
            }
        }
        self.pool.shutdown().await;
        info!("server stopped");
        Ok(())
    }

    /// Signals the accept loop to close.
    ///
    /// The signal is remembered, so stopping before `run` is safe.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }
}
