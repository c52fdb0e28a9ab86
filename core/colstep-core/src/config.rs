//! Cursor configuration.
//!
//! Sources, lowest to highest precedence: `CursorConfig::default()`, a JSON
//! file (`load_from_file`), environment variables (`apply_env`).

use crate::error::{CursorError, CursorResult};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Environment variable overriding [`CursorConfig::yield_interval`].
pub const YIELD_INTERVAL_ENV: &str = "COLSTEP_YIELD_INTERVAL";

/// Settings for the in-memory reference cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Simulated scheduling budget. With `Some(n)` the first advance call
    /// answers `MustYield`, then `n` calls are performed before the next
    /// `MustYield`, so one call in every `n + 1` yields. `None` never yields.
    pub yield_interval: Option<u32>,
}

impl CursorConfig {
    /// Never yields.
    pub fn no_yield() -> Self {
        Self::default()
    }

    /// Yields once before every `interval` performed advance calls.
    pub fn yielding_every(interval: u32) -> CursorResult<Self> {
        let config = Self {
            yield_interval: Some(interval),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CursorResult<()> {
        if self.yield_interval == Some(0) {
            return Err(CursorError::Config(
                "yield_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> CursorResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from environment variables that are set.
    pub fn apply_env(&mut self) -> CursorResult<()> {
        self.apply_vars(|name| env::var(name))
    }

    fn apply_vars(
        &mut self,
        lookup: impl Fn(&str) -> Result<String, VarError>,
    ) -> CursorResult<()> {
        match lookup(YIELD_INTERVAL_ENV) {
            Ok(raw) => self.yield_interval = parse_yield_interval(&raw)?,
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(raw)) => {
                return Err(CursorError::Config(format!(
                    "{YIELD_INTERVAL_ENV} is not valid unicode: {raw:?}"
                )));
            }
        }
        self.validate()
    }

    #[instrument]
    pub fn load_from_file(path: &Path) -> CursorResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        info!(?config, "loaded cursor config");
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> CursorResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// `""`, `"none"` and `"off"` disable yielding.
fn parse_yield_interval(raw: &str) -> CursorResult<Option<u32>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") || raw.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|e| CursorError::Config(format!("{YIELD_INTERVAL_ENV}={raw:?}: {e}")))
}
