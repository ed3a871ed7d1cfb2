//! In-process fakes of every port.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bgl_domain::{
    AuthorizationState, CallbackFailure, CallbackParams, Credential, HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};

use crate::config::{ClientSettings, OAuthClientConfig};
use crate::context::ServiceContext;
use crate::error::{AuthError, ConfigError};
use crate::ports::{
    BrowserLauncher, CallbackListener, Clock, CredentialStore, HttpTransport, PendingCallback,
    TransportError,
};

pub const NOW_MS: i64 = 1_700_000_000_000;

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub credential: Mutex<Credential>,
    pub saves: AtomicUsize,
    pub fail_save: AtomicBool,
}

impl MemoryStore {
    pub fn with(credential: Credential) -> Arc<Self> {
        Arc::new(Self {
            credential: Mutex::new(credential),
            ..Self::default()
        })
    }

    pub fn current(&self) -> Credential {
        self.credential.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<Credential, ConfigError> {
        Ok(self.current())
    }

    async fn save(&self, credential: &Credential) -> Result<(), ConfigError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(ConfigError::Serialize("disk full".to_string()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.credential.lock().unwrap() = credential.clone();
        Ok(())
    }
}

/// Replays queued responses and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    pub requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count_to(&self, suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.url.ends_with(suffix))
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

pub fn token_body(access: &str, refresh: &str) -> HttpResponse {
    HttpResponse::new(
        200,
        format!(
            r#"{{"access_token":"{access}","token_type":"Bearer","expires_in":3600,"refresh_token":"{refresh}"}}"#
        ),
    )
}

pub fn expired_401() -> HttpResponse {
    HttpResponse::new(401, "").with_header(
        "WWW-Authenticate",
        r#"Bearer error="invalid_token", error_description="The access token expired""#,
    )
}

pub fn context(
    store: Arc<MemoryStore>,
    transport: Arc<ScriptedTransport>,
    now_ms: i64,
) -> ServiceContext {
    ServiceContext::new(
        store,
        transport,
        Arc::new(FixedClock::at_millis(now_ms)),
        OAuthClientConfig::new("client-id", "client-secret"),
        ClientSettings::default(),
    )
}

pub fn logged_in(expires_at: i64) -> Credential {
    Credential {
        space: "foo.backlog.com".to_string(),
        access_token: "old-access".to_string(),
        refresh_token: "old-refresh".to_string(),
        expires_at,
    }
}

/// What the fake listener's redirect looks like.
#[derive(Clone)]
pub enum Redirect {
    /// A redirect with these query parameters.
    Query(String),
    /// No redirect ever arrives.
    Never,
}

/// Tracks binds and releases of the fake port.
#[derive(Default)]
pub struct PortState {
    pub bound: AtomicBool,
    pub binds: AtomicUsize,
}

pub struct FakeListener {
    pub redirect: Redirect,
    pub port: Arc<PortState>,
    pub fail_bind: bool,
}

impl FakeListener {
    pub fn new(redirect: Redirect) -> Arc<Self> {
        Arc::new(Self {
            redirect,
            port: Arc::new(PortState::default()),
            fail_bind: false,
        })
    }
}

#[async_trait]
impl CallbackListener for FakeListener {
    async fn bind(
        &self,
        port: u16,
        state: AuthorizationState,
    ) -> Result<Box<dyn PendingCallback>, AuthError> {
        if self.fail_bind || self.port.bound.swap(true, Ordering::SeqCst) {
            return Err(AuthError::CallbackPortUnavailable {
                port,
                message: "address in use".to_string(),
            });
        }
        self.port.binds.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePending {
            port,
            state,
            redirect: self.redirect.clone(),
            port_state: Arc::clone(&self.port),
        }))
    }
}

struct FakePending {
    port: u16,
    state: AuthorizationState,
    redirect: Redirect,
    port_state: Arc<PortState>,
}

#[async_trait]
impl PendingCallback for FakePending {
    fn port(&self) -> u16 {
        self.port
    }

    async fn recv(&mut self) -> Result<String, CallbackFailure> {
        match &self.redirect {
            Redirect::Query(query) => {
                let query = query.replace("{state}", self.state.as_str());
                self.state.verify_callback(&CallbackParams::from_query(&query))
            }
            Redirect::Never => std::future::pending().await,
        }
    }

    async fn shutdown(&mut self) {
        self.port_state.bound.store(false, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingBrowser {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
}

impl BrowserLauncher for RecordingBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            Err(std::io::Error::other("no browser"))
        } else {
            Ok(())
        }
    }
}
