//! Configuration for a chat

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Chat configuration shared by every request an agent issues.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct General {
    /// The model to use
    pub model: CompactString,

    /// Sampling temperature
    pub temperature: f32,
}

impl General {
    /// Create a new configuration
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            temperature: 0.0,
        }
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b".into(),
            temperature: 0.0,
        }
    }
}
