//! File-based credential store.
//!
//! The credential lives in `config.json` inside the configuration directory:
//! ```json
//! {
//!   "access_token": "...",
//!   "expires_at": 1700000000000,
//!   "refresh_token": "...",
//!   "space": "foo.backlog.com"
//! }
//! ```
//! The directory is created owner-only (0700) and the file is written
//! owner-only (0600) on unix.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bgl_application::ConfigError;
use bgl_application::ports::CredentialStore;
use bgl_domain::Credential;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::credential_path;
use crate::serialization::{from_json_bytes, to_json_stable_bytes};

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store reading and writing `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location (`$XDG_CONFIG_HOME/bgl/config.json`
    /// or `~/.config/bgl/config.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no home directory can be found.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        credential_path().map(Self::new)
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path, source: std::io::Error) -> ConfigError {
        ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    async fn ensure_dir(&self) -> Result<(), ConfigError> {
        let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(DIR_MODE);
        builder
            .create(dir)
            .await
            .map_err(|e| Self::io_error(dir, e))
    }

    /// New files are created owner-only; existing ones keep their mode
    /// until `restrict_permissions` runs.
    async fn write_file(&self, content: &[u8]) -> std::io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = options.open(&self.path).await?;
        file.write_all(content).await?;
        file.flush().await
    }

    #[cfg(unix)]
    async fn restrict_permissions(&self) -> Result<(), ConfigError> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(&self.path, std::fs::Permissions::from_mode(FILE_MODE))
            .await
            .map_err(|e| Self::io_error(&self.path, e))
    }

    #[cfg(not(unix))]
    #[allow(clippy::unused_async)]
    async fn restrict_permissions(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credential, ConfigError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No credential file, using empty credential");
                return Ok(Credential::default());
            }
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        from_json_bytes(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn save(&self, credential: &Credential) -> Result<(), ConfigError> {
        self.ensure_dir().await?;

        let content =
            to_json_stable_bytes(credential).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        self.write_file(&content)
            .await
            .map_err(|e| Self::io_error(&self.path, e))?;
        self.restrict_permissions().await?;

        debug!(path = %self.path.display(), "Credential saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Credential {
        Credential {
            space: "foo.backlog.com".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 1_700_000_000_000,
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("bgl").join("config.json"));

        let credential = store.load().await.unwrap();

        assert_eq!(credential, Credential::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("bgl").join("config.json"));

        store.save(&sample()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_save_is_stable() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("config.json"));

        store.save(&sample()).await.unwrap();
        let first = std::fs::read(store.path()).unwrap();
        let loaded = store.load().await.unwrap();
        store.save(&loaded).await.unwrap();
        let second = std::fs::read(store.path()).unwrap();

        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, b"not json").unwrap();

        let result = FileCredentialStore::new(&path).load().await;

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_partial_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, br#"{"space":"foo.backlog.jp"}"#).unwrap();

        let credential = FileCredentialStore::new(&path).load().await.unwrap();

        assert_eq!(credential.space, "foo.backlog.jp");
        assert!(!credential.is_authenticated());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("bgl");
        let store = FileCredentialStore::new(config_dir.join("config.json"));

        store.save(&sample()).await.unwrap();

        let file_mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        let dir_mode = std::fs::metadata(&config_dir).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_save_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, vec![b' '; 4096]).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let store = FileCredentialStore::new(&path);

        store.save(&sample()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap(), sample());
    }
}
