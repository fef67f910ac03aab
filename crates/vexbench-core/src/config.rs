//! Benchmark configuration with TOML support.
//!
//! All tunables the harness honors live here; nothing is read from hidden
//! process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VexbenchError};

/// Tunables for one benchmark session.
///
/// Defaults mirror the constants the harness was tuned with: 1 Mi elements,
/// 1000 timed iterations, 100 warmup iterations, seed 42.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Elements per input buffer.
    pub array_size: usize,
    /// Timed repetitions per implementation.
    pub iterations: usize,
    /// Untimed repetitions before measurement begins.
    pub warmup_iterations: usize,
    /// PRNG seed for reproducible input buffers.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            array_size: 1 << 20,
            iterations: 1000,
            warmup_iterations: 100,
            seed: 42,
        }
    }
}

impl BenchConfig {
    /// Validate configuration values.
    ///
    /// `warmup_iterations` may be zero; skipping warmup degrades measurement
    /// quality but is not an invalid session.
    pub fn validate(&self) -> Result<()> {
        if self.array_size == 0 {
            return Err(VexbenchError::InvalidConfig(
                "array_size must be > 0".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(VexbenchError::InvalidConfig(
                "iterations must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            VexbenchError::Other(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| VexbenchError::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
