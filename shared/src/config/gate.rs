//! Refresh gate configuration module

use serde::{Deserialize, Serialize};

/// Window settings for the export refresh gate
///
/// With the defaults, the third access to the same resource inside one hour
/// forces a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GateConfig {
    /// Length of a counting window in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: i64,

    /// Credits granted when a window starts
    #[serde(default = "default_credits")]
    pub credits: i64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            credits: default_credits(),
        }
    }
}

impl GateConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let window_seconds = std::env::var("GATE_WINDOW_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v > 0)
            .unwrap_or_else(default_window_seconds);
        let credits = std::env::var("GATE_CREDITS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &i64| *v >= 1)
            .unwrap_or_else(default_credits);

        Self {
            window_seconds,
            credits,
        }
    }
}

fn default_window_seconds() -> i64 {
    60 * 60
}

fn default_credits() -> i64 {
    2
}
