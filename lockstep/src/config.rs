//! Engine configuration, loaded from `lockstep.toml` when the host provides
//! a path, otherwise defaults.
//!
//! The only tunable today is the overlap bias. Its magnitude is deliberately
//! configuration rather than contract: any small positive value keeps one
//! anchor line shared between adjacent views.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration for the scroll-synchronization engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// How many lines adjacent views overlap after synchronization.
    ///
    /// The default of 2 makes a left neighbor end on the master's first
    /// visible line and a right neighbor start on the master's last, so the
    /// reader always has one shared anchor line instead of a seam.
    #[serde(default = "default_overlap_lines")]
    pub overlap_lines: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            overlap_lines: default_overlap_lines(),
        }
    }
}

fn default_overlap_lines() -> u32 {
    2
}

impl SyncConfig {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
