//! Durable storage for the session credential.

use std::path::PathBuf;

use anyhow::Context;
use parking_lot::RwLock;

/// Persistent key-value store holding the single opaque session token.
///
/// Writes are best-effort: persistence failures are logged and swallowed so a
/// broken disk never turns into an authentication error. The session simply
/// will not survive a restart.
pub trait TokenStore: Send + Sync {
    /// The stored token, if any. Whitespace-only content counts as absent.
    fn load(&self) -> Option<String>;

    fn save(&self, token: &str);

    fn clear(&self);
}

/// Token store backed by a single file in the OS data directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under `{app_data_dir}/talentdesk/token`.
    pub fn open_default() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut home| {
                    home.push(".local");
                    home.push("share");
                    home
                })
            })
            .context("failed to resolve OS app data directory")?;

        let mut dir = base;
        dir.push("talentdesk");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create token directory at {dir:?}"))?;

        dir.push("token");
        Ok(Self { path: dir })
    }

    /// Store at an explicit path (tests, embedded hosts).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!("failed to read token file {:?}: {err}", self.path);
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Err(err) = std::fs::write(&self.path, token) {
            tracing::error!("failed to persist token to {:?}: {err}", self.path);
        }
    }

    fn clear(&self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to clear token file {:?}: {err}", self.path);
            }
        }
    }
}

/// In-memory token store for tests and embedded use.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already present, as if persisted by a prior run.
    pub fn seeded(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn save(&self, token: &str) {
        *self.token.write() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write() = None;
    }
}
