//! Shared helpers for the CLI integration tests.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bgl::AppContext;
use bgl_application::{ClientSettings, OAuthClientConfig, OAuthSettings};
use bgl_domain::Credential;
use bgl_infrastructure::FileCredentialStore;
use tempfile::TempDir;

pub const SPACE: &str = "foo.backlog.com";
pub const FAR_FUTURE_MS: i64 = 4_102_444_800_000;
pub const EXPIRED_CHALLENGE: &str =
    r#"Bearer error="invalid_token", error_description="The access token expired""#;

/// A temporary config directory plus a context pointed at a mock server.
pub struct TestEnv {
    pub dir: TempDir,
    pub ctx: AppContext,
}

impl TestEnv {
    pub fn new(base_url: &str) -> Self {
        Self::with_oauth(base_url, OAuthSettings::default())
    }

    pub fn with_oauth(base_url: &str, oauth: OAuthSettings) -> Self {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("bgl").join("config.json"));
        let settings = ClientSettings {
            timeout: Duration::from_secs(10),
            base_url: Some(base_url.to_string()),
        };
        let ctx = AppContext::new(
            Arc::new(store),
            OAuthClientConfig::new("client-id", "client-secret"),
            settings,
            oauth,
        )
        .unwrap();
        Self { dir, ctx }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("bgl").join("config.json")
    }

    pub fn write_credential(&self, credential: &Credential) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, serde_json::to_vec_pretty(credential).unwrap()).unwrap();
    }

    pub fn read_credential(&self) -> Credential {
        serde_json::from_slice(&std::fs::read(self.config_path()).unwrap()).unwrap()
    }

    pub fn logged_in(&self, access_token: &str, expires_at: i64) {
        self.write_credential(&Credential {
            space: SPACE.to_string(),
            access_token: access_token.to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at,
        });
    }
}

/// Output captured from a command, with terminal styling removed.
pub fn text(out: &[u8]) -> String {
    console::strip_ansi_codes(&String::from_utf8_lossy(out)).into_owned()
}

pub fn token_body(access: &str, refresh: &str) -> String {
    serde_json::json!({
        "access_token": access,
        "token_type": "Bearer",
        "expires_in": 3600,
        "refresh_token": refresh,
    })
    .to_string()
}
