//! HTTP server bootstrap.
//!
//! Binds a resolved HTTP handler to a listening port. Socket accept and
//! protocol framing are delegated to hyper and tokio; a bind failure is
//! fatal and surfaced to the caller once, never retried.

use std::net::SocketAddr;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use fletcher_core::{FletcherError, FletcherResult, HttpHandler};

use crate::bridge;
use crate::shutdown::ShutdownSignal;

/// A resolved HTTP handler paired with the port to serve it on.
///
/// # Example
///
/// ```rust,ignore
/// use fletcher_server::Server;
///
/// let handle = Server::new(handler, 8080).bind().await?;
/// println!("listening on port {}", handle.port());
/// handle.stopped().await;
/// ```
pub struct Server {
    handler: HttpHandler,
    port: u16,
}

impl Server {
    /// Creates a server for the given handler and port.
    ///
    /// Port `0` requests an ephemeral port; the bound port is reported on
    /// the returned handle.
    #[must_use]
    pub fn new(handler: HttpHandler, port: u16) -> Self {
        Self { handler, port }
    }

    /// Binds the listening socket and starts accepting connections.
    ///
    /// # Errors
    ///
    /// Returns [`FletcherError::Bind`] if the port cannot be acquired.
    pub async fn bind(self) -> FletcherResult<ServerHandle> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| FletcherError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| FletcherError::Bind {
            addr: addr.to_string(),
            source,
        })?;

        tracing::info!(port = local_addr.port(), "listening");

        let shutdown = ShutdownSignal::new();
        let task = tokio::spawn(accept_loop(listener, self.handler, shutdown.clone()));

        Ok(ServerHandle {
            addr: local_addr,
            shutdown,
            task,
        })
    }
}

/// Handle to a running server.
#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: ShutdownSignal,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// The bound socket address.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The bound port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// A clone of the server's shutdown signal.
    #[must_use]
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Triggers shutdown of the accept loop and open connections.
    pub fn shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Waits for the accept loop to finish.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

async fn accept_loop(listener: TcpListener, handler: HttpHandler, shutdown: ShutdownSignal) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, remote_addr)) => {
                        let handler = handler.clone();
                        let shutdown = shutdown.clone();
                        tokio::spawn(async move {
                            if let Err(err) = serve_connection(stream, handler, shutdown).await {
                                tracing::error!(%remote_addr, error = %err, "connection error");
                            }
                        });
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to accept connection");
                    }
                }
            }

            () = shutdown.recv() => {
                tracing::info!("shutdown signal received, stopping server");
                break;
            }
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    handler: HttpHandler,
    shutdown: ShutdownSignal,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req| {
        let handler = handler.clone();
        async move { bridge::handle_request(&handler, req).await }
    });

    let conn = http1::Builder::new().serve_connection(io, service);

    tokio::select! {
        result = conn => result,
        () = shutdown.recv() => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fletcher_core::{http_handler_fn, ResponseHead, Streamable};

    fn ok_handler() -> HttpHandler {
        http_handler_fn(|_head, _body| async { Ok((ResponseHead::ok(), Streamable::empty())) })
    }

    #[tokio::test]
    async fn test_bind_reports_ephemeral_port() {
        let handle = Server::new(ok_handler(), 0).bind().await.unwrap();
        assert_ne!(handle.port(), 0);
        handle.shutdown();
        handle.stopped().await;
    }

    #[tokio::test]
    async fn test_bind_conflict_is_a_bind_error() {
        let first = Server::new(ok_handler(), 0).bind().await.unwrap();
        let err = Server::new(ok_handler(), first.port()).bind().await.unwrap_err();
        assert!(matches!(err, FletcherError::Bind { .. }));
        first.shutdown();
        first.stopped().await;
    }
}
