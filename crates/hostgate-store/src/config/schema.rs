use serde::Deserialize;
use hostgate_core::error::{HostGateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostGateConfig {
    pub version: u32,

    #[serde(default)]
    pub store: StoreSection,
}

impl HostGateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(HostGateError::UnsupportedVersion);
        }
        self.store.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Durable rows in a SQLite file.
    #[default]
    Sqlite,
    /// Process-local; rules are lost on exit.
    Memory,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Memory => "memory",
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub sqlite: SqliteSection,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.backend == Backend::Sqlite {
            self.sqlite.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqliteSection {
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_connections")]
    pub connections: usize,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for SqliteSection {
    fn default() -> Self {
        Self {
            path: default_path(),
            connections: default_connections(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl SqliteSection {
    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(HostGateError::BadRequest("store.sqlite.path must not be empty".into()));
        }
        if !(1..=64).contains(&self.connections) {
            return Err(HostGateError::BadRequest(
                "store.sqlite.connections must be between 1 and 64".into(),
            ));
        }
        if !(100..=60000).contains(&self.busy_timeout_ms) {
            return Err(HostGateError::BadRequest(
                "store.sqlite.busy_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "hostgate.db".into()
}
fn default_connections() -> usize {
    4
}
fn default_busy_timeout_ms() -> u64 {
    5000
}
