//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Default pause after each field write, giving the host page a turn
/// to react before the next field is touched.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Tunables for one fill engine instance.
///
/// Heuristic weights and thresholds are named constants in their owning
/// modules; this only carries knobs that vary per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Milliseconds to wait after dispatching events on a written field.
    pub settle_delay_ms: u64,
    /// Whether filled fields get visual feedback annotations.
    pub feedback_enabled: bool,
}

impl EngineConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        let settle_delay_ms = std::env::var("FORMPILOT_SETTLE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SETTLE_DELAY_MS);
        let feedback_enabled = std::env::var("FORMPILOT_FEEDBACK")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            settle_delay_ms,
            feedback_enabled,
        }
    }

    /// Configuration for tests: no settle delay, no annotations.
    pub fn immediate() -> Self {
        Self {
            settle_delay_ms: 0,
            feedback_enabled: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            feedback_enabled: true,
        }
    }
}
