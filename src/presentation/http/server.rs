//! Connection Acceptor
//!
//! Owns the listening socket. Each accepted connection is served by its own
//! tokio task for exactly one HTTP/1.1 request and then closed.
//!
//! Admission is bounded: a semaphore permit is taken *before* `accept()`, so
//! once `max_connections` connections are in flight further clients wait in
//! the kernel backlog instead of being accepted and left unserved.
//!
//! On shutdown the listener is closed first, then the acceptor waits for every
//! permit to come back so in-flight requests finish before it returns.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::Instrument;

use crate::infrastructure::metrics::ConnectionGuard;

const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ConnectionAcceptor {
    listener: TcpListener,
    service: Router,
    permits: Arc<Semaphore>,
    limit: u32,
}

impl ConnectionAcceptor {
    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns the bind error; nothing has been accepted at that point.
    pub async fn bind<A: ToSocketAddrs>(
        addr: A,
        service: Router,
        max_connections: usize,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, service, max_connections))
    }

    pub fn from_listener(listener: TcpListener, service: Router, max_connections: usize) -> Self {
        let limit = u32::try_from(max_connections.clamp(1, Semaphore::MAX_PERMITS))
            .unwrap_or(u32::MAX);
        Self {
            listener,
            service,
            permits: Arc::new(Semaphore::new(limit as usize)),
            limit,
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves, then drain.
    ///
    /// Transient `accept()` failures are logged and retried after a short
    /// pause. After shutdown no new connection is accepted; connections
    /// already being served are given up to 30 seconds to finish.
    pub async fn run_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            listener,
            service,
            permits,
            limit,
        } = self;
        tokio::pin!(shutdown);

        loop {
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = permits.clone().acquire_owned() => {
                    permit.map_err(io::Error::other)?
                }
            };

            let (stream, peer) = tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                },
            };

            let span = tracing::info_span!(
                "connection",
                %peer,
                id = %uuid::Uuid::new_v4()
            );
            tokio::spawn(serve_connection(stream, service.clone(), permit).instrument(span));
        }

        drop(listener);
        let in_flight = limit as usize - permits.available_permits();
        if in_flight > 0 {
            tracing::info!(in_flight, "Waiting for in-flight connections");
        }

        match tokio::time::timeout(DRAIN_TIMEOUT, permits.acquire_many(limit)).await {
            Ok(drained) => {
                drained.map_err(io::Error::other)?;
                tracing::info!("Connection acceptor stopped");
            }
            Err(_) => tracing::warn!(
                in_flight = limit as usize - permits.available_permits(),
                "Connection acceptor stopped before in-flight connections finished"
            ),
        }
        Ok(())
    }
}

async fn serve_connection(stream: TcpStream, service: Router, _permit: OwnedSemaphorePermit) {
    let _active = ConnectionGuard::new();
    tracing::debug!("Connection accepted");

    let result = http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), TowerToHyperService::new(service))
        .await;

    match result {
        Ok(()) => tracing::debug!("Connection closed"),
        Err(e) => tracing::debug!(error = %e, "Connection closed with error"),
    }
}
