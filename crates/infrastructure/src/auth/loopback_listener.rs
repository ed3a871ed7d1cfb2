//! Loopback HTTP listener that captures the OAuth redirect.
//!
//! Binds `127.0.0.1:{port}`, plus `[::1]:{port}` where IPv6 is available so
//! `localhost` reaches it on either stack, and answers plain HTTP/1.1
//! requests from the browser. Only `GET /` completes the wait; any other path (favicon probes,
//! for instance) gets a 404 and the listener keeps waiting. The first `/`
//! request decides the outcome and the listener stops accepting.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use async_trait::async_trait;
use bgl_application::AuthError;
use bgl_application::ports::{CallbackListener, PendingCallback};
use bgl_domain::{AuthorizationState, CallbackFailure, CallbackParams};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const SUCCESS_PAGE: &str =
    "<html><body><h1>Login successful!</h1><p>You can close this window.</p></body></html>";

/// Header lines read before giving up on a request.
const MAX_HEADER_LINES: usize = 100;

type CallbackResult = Result<String, CallbackFailure>;

/// Binds a loopback listener per login attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackCallbackListener;

impl LoopbackCallbackListener {
    /// Creates a listener factory bound to the loopback addresses.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// The IPv4 socket is required; the IPv6 one is skipped on hosts without `::1`.
struct LoopbackSockets {
    v4: TcpListener,
    v6: Option<TcpListener>,
}

impl LoopbackSockets {
    async fn bind(port: u16) -> Result<Self, AuthError> {
        let unavailable = |e: std::io::Error| AuthError::CallbackPortUnavailable {
            port,
            message: e.to_string(),
        };

        let v4 = TcpListener::bind((Ipv4Addr::LOCALHOST, port))
            .await
            .map_err(unavailable)?;
        let port = v4.local_addr().map_or(port, |addr| addr.port());

        let v6 = match TcpListener::bind((Ipv6Addr::LOCALHOST, port)).await {
            Ok(listener) => Some(listener),
            Err(e) if e.kind() == ErrorKind::AddrInUse => return Err(unavailable(e)),
            Err(e) => {
                debug!(error = %e, "IPv6 loopback unavailable, listening on IPv4 only");
                None
            }
        };

        Ok(Self { v4, v6 })
    }

    fn port(&self) -> Option<u16> {
        self.v4.local_addr().ok().map(|addr| addr.port())
    }

    async fn accept(&self) -> std::io::Result<(TcpStream, SocketAddr)> {
        match &self.v6 {
            Some(v6) => tokio::select! {
                accepted = self.v4.accept() => accepted,
                accepted = v6.accept() => accepted,
            },
            None => self.v4.accept().await,
        }
    }
}

#[async_trait]
impl CallbackListener for LoopbackCallbackListener {
    async fn bind(
        &self,
        port: u16,
        state: AuthorizationState,
    ) -> Result<Box<dyn PendingCallback>, AuthError> {
        let sockets = LoopbackSockets::bind(port).await?;
        let port = sockets.port().unwrap_or(port);
        debug!(port, ipv6 = sockets.v6.is_some(), "Callback listener bound");

        let (tx, rx) = oneshot::channel();
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(serve(sockets, state, tx, shutdown.clone()));

        Ok(Box::new(LoopbackPending {
            port,
            rx,
            received: false,
            shutdown,
            task: Some(task),
        }))
    }
}

struct LoopbackPending {
    port: u16,
    rx: oneshot::Receiver<CallbackResult>,
    received: bool,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

#[async_trait]
impl PendingCallback for LoopbackPending {
    fn port(&self) -> u16 {
        self.port
    }

    async fn recv(&mut self) -> CallbackResult {
        if self.received {
            return Err(CallbackFailure::Listener(
                "callback already received".to_string(),
            ));
        }
        let result = (&mut self.rx).await;
        self.received = true;
        result.unwrap_or_else(|_| {
            Err(CallbackFailure::Listener(
                "callback listener stopped".to_string(),
            ))
        })
    }

    async fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Callback listener task failed");
        }
        debug!(port = self.port, "Callback listener released");
    }
}

impl Drop for LoopbackPending {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Accepts connections until the first `/` request or shutdown.
///
/// Connections are answered concurrently so an idle preconnect from the
/// browser cannot hold up the redirect.
async fn serve(
    sockets: LoopbackSockets,
    state: AuthorizationState,
    tx: oneshot::Sender<CallbackResult>,
    shutdown: CancellationToken,
) {
    let state = Arc::new(state);
    let mut connections = JoinSet::new();
    loop {
        tokio::select! {
            () = shutdown.cancelled() => return,
            accepted = sockets.accept() => match accepted {
                Ok((stream, peer)) => {
                    debug!(%peer, "Callback connection accepted");
                    connections.spawn(handle_connection(stream, Arc::clone(&state)));
                }
                Err(e) => {
                    let _ = tx.send(Err(CallbackFailure::Listener(e.to_string())));
                    return;
                }
            },
            Some(joined) = connections.join_next() => match joined {
                Ok(Ok(Some(result))) => {
                    // The receiver may already be gone after a timeout or cancel.
                    let _ = tx.send(result);
                    return;
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => debug!(error = %e, "Ignoring malformed callback request"),
                Err(e) => warn!(error = %e, "Callback connection task failed"),
            },
        }
    }
}

/// Answers one request. Returns the outcome for `/`, `None` for other paths.
async fn handle_connection(
    stream: TcpStream,
    state: Arc<AuthorizationState>,
) -> std::io::Result<Option<CallbackResult>> {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    for _ in 0..MAX_HEADER_LINES {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 || line.trim_end().is_empty() {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    if method != "GET" || path != "/" {
        write_response(reader.get_mut(), "404 Not Found", "text/plain", "Not Found").await?;
        return Ok(None);
    }

    let result = state.verify_callback(&CallbackParams::from_query(query));
    match &result {
        Ok(_) => {
            write_response(
                reader.get_mut(),
                "200 OK",
                "text/html; charset=utf-8",
                SUCCESS_PAGE,
            )
            .await?;
        }
        Err(CallbackFailure::StateMismatch { .. }) => {
            warn!("Callback state mismatch");
            write_response(reader.get_mut(), "400 Bad Request", "text/plain", "State mismatch")
                .await?;
        }
        Err(_) => {
            write_response(
                reader.get_mut(),
                "400 Bad Request",
                "text/plain",
                "No authorization code",
            )
            .await?;
        }
    }
    Ok(Some(result))
}

async fn write_response(
    stream: &mut TcpStream,
    status: &str,
    content_type: &str,
    body: &str,
) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    stream.shutdown().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::net::IpAddr;
    use std::time::Duration;

    use tokio::io::AsyncReadExt;

    use super::*;

    async fn get(port: u16, target: &str) -> String {
        get_at(IpAddr::V4(Ipv4Addr::LOCALHOST), port, target).await
    }

    async fn get_at(host: IpAddr, port: u16, target: &str) -> String {
        let mut stream = TcpStream::connect((host, port)).await.unwrap();
        let request = format!("GET {target} HTTP/1.1\r\nHost: localhost:{port}\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn bind_any(state: &str) -> Box<dyn PendingCallback> {
        LoopbackCallbackListener::new()
            .bind(0, AuthorizationState::from_value(state))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_delivers_code() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let response = get(port, "/?state=s1&code=abc").await;

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("Login successful!"));
        assert_eq!(pending.recv().await, Ok("abc".to_string()));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_state_mismatch_answers_400() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let response = get(port, "/?state=other&code=abc").await;

        assert!(response.starts_with("HTTP/1.1 400 Bad Request"));
        assert!(response.ends_with("State mismatch"));
        assert!(matches!(
            pending.recv().await,
            Err(CallbackFailure::StateMismatch { .. })
        ));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_code_answers_400() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let response = get(port, "/?state=s1").await;

        assert!(response.ends_with("No authorization code"));
        assert_eq!(pending.recv().await, Err(CallbackFailure::MissingCode));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_other_paths_do_not_complete() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let response = get(port, "/favicon.ico").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"));

        let early = tokio::time::timeout(Duration::from_millis(50), pending.recv()).await;
        assert!(early.is_err());

        get(port, "/?state=s1&code=late").await;
        assert_eq!(pending.recv().await, Ok("late".to_string()));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_idle_connection_does_not_block_redirect() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let _idle = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let response = get(port, "/?state=s1&code=abc").await;

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert_eq!(pending.recv().await, Ok("abc".to_string()));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_ipv6_loopback_delivers_code() {
        if std::net::TcpListener::bind((Ipv6Addr::LOCALHOST, 0)).is_err() {
            return;
        }
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let response = get_at(IpAddr::V6(Ipv6Addr::LOCALHOST), port, "/?state=s1&code=v6").await;

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert_eq!(pending.recv().await, Ok("v6".to_string()));
        pending.shutdown().await;
    }

    #[tokio::test]
    async fn test_port_released_after_shutdown() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();

        let busy = LoopbackCallbackListener::new()
            .bind(port, AuthorizationState::from_value("s2"))
            .await;
        assert!(matches!(
            busy,
            Err(AuthError::CallbackPortUnavailable { .. })
        ));

        pending.shutdown().await;

        let mut again = LoopbackCallbackListener::new()
            .bind(port, AuthorizationState::from_value("s3"))
            .await
            .unwrap();
        assert_eq!(again.port(), port);
        again.shutdown().await;
    }

    #[tokio::test]
    async fn test_port_released_after_success() {
        let mut pending = bind_any("s1").await;
        let port = pending.port();
        get(port, "/?state=s1&code=abc").await;
        pending.recv().await.unwrap();
        pending.shutdown().await;

        let mut again = LoopbackCallbackListener::new()
            .bind(port, AuthorizationState::from_value("s2"))
            .await
            .unwrap();
        again.shutdown().await;
    }
}
