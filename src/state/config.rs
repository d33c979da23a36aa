// src/state/config.rs
//
// Construction-time configuration of a control unit.

use crate::error::{Result, UnitError};

use super::LaneLayout;

pub const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

/// Configuration for creating a control unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConfig {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0).
    pub sample_rate: f64,

    /// Which lanes the unit reads.
    pub layout: LaneLayout,

    /// In per-sample mode, also check the block-rate lanes once at the
    /// start of every block. Off: only the sample-rate subset is ever
    /// re-checked after construction.
    pub slow_param_refresh: bool,
}

impl UnitConfig {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: LaneLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_slow_param_refresh(mut self, enabled: bool) -> Self {
        self.slow_param_refresh = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(UnitError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            layout: LaneLayout::STANDARD,
            slow_param_refresh: true,
        }
    }
}
