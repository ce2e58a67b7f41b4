//! Store config loader (strict parsing).

pub mod schema;

use std::fs;

use hostgate_core::error::{HostGateError, Result};

pub use schema::{Backend, HostGateConfig, SqliteSection, StoreSection};

pub fn load_from_file(path: &str) -> Result<HostGateConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| HostGateError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HostGateConfig> {
    let cfg: HostGateConfig = serde_yaml::from_str(s)
        .map_err(|e| HostGateError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
