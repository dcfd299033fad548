//! Execution settings for the CPU executor.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ExecConfig::parallel_threshold`].
pub const PARALLEL_THRESHOLD_ENV: &str = "ND_ARRAY_PARALLEL_THRESHOLD";

const DEFAULT_PARALLEL_THRESHOLD: usize = 8192;

/// Tuning knobs for op execution. None of them affect results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Minimum number of elements (or slices, for per-slice reductions)
    /// before work is split across the rayon thread pool.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

impl ExecConfig {
    pub fn new() -> Self {
        ExecConfig {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Builder-style override of the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Defaults, with the parallel threshold taken from
    /// `ND_ARRAY_PARALLEL_THRESHOLD` when it is set to a valid integer.
    pub fn from_env() -> Self {
        let config = Self::new();
        match std::env::var(PARALLEL_THRESHOLD_ENV) {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(threshold) => config.with_parallel_threshold(threshold),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid {PARALLEL_THRESHOLD_ENV}");
                    config
                }
            },
            Err(_) => config,
        }
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ExecConfig::default();
        assert_eq!(c.parallel_threshold, 8192);
        assert_eq!(c.with_parallel_threshold(16).parallel_threshold, 16);
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = ExecConfig::new().with_parallel_threshold(100);
        let json = serde_json::to_string(&c).unwrap();
        let back: ExecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let c: ExecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, ExecConfig::default());
    }
}
