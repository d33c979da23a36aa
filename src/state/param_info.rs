// src/state/param_info.rs
//
// Parameter metadata for display, defaults and host fallbacks.

use std::fmt;

use crate::parameter::{PARAM_COUNT, ParamId};

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamUnit {
    #[default]
    None,
    /// Hertz (frequency)
    Hz,
    /// Decibels (gain)
    Db,
    /// Percentage (0-100)
    Percent,
    /// Milliseconds
    Ms,
}

impl fmt::Display for ParamUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamUnit::None => Ok(()),
            ParamUnit::Hz => write!(f, "Hz"),
            ParamUnit::Db => write!(f, "dB"),
            ParamUnit::Percent => write!(f, "%"),
            ParamUnit::Ms => write!(f, "ms"),
        }
    }
}

/// Metadata describing one parameter lane.
///
/// The range is nominal: the control layer never clamps, it only uses
/// the default when a host leaves a lane unconnected.
#[derive(Debug, Clone, Copy)]
pub struct ParamInfo {
    pub id: ParamId,

    /// Human-readable name
    pub name: &'static str,

    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub unit: ParamUnit,
}

impl ParamInfo {
    pub const fn new(id: ParamId, name: &'static str) -> Self {
        Self {
            id,
            name,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            unit: ParamUnit::None,
        }
    }

    pub const fn range(mut self, min: f32, max: f32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub const fn default(mut self, value: f32) -> Self {
        self.default = value;
        self
    }

    pub const fn unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Whether a value lies inside the nominal range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Format a value for display.
    pub fn format(&self, value: f32) -> String {
        if self.unit == ParamUnit::None {
            format!("{:.2}", value)
        } else {
            format!("{:.2} {}", value, self.unit)
        }
    }
}

/// Metadata for every lane, indexed by `ParamId as usize`.
pub const PARAM_INFO: [ParamInfo; PARAM_COUNT] = [
    ParamInfo::new(ParamId::Waveform, "Waveform").default(0.85),
    ParamInfo::new(ParamId::Tuning, "Tuning")
        .range(400.0, 480.0)
        .default(440.0)
        .unit(ParamUnit::Hz),
    ParamInfo::new(ParamId::Cutoff, "Cutoff")
        .range(314.0, 2394.0)
        .default(1000.0)
        .unit(ParamUnit::Hz),
    ParamInfo::new(ParamId::Resonance, "Resonance")
        .range(0.0, 100.0)
        .default(50.0)
        .unit(ParamUnit::Percent),
    ParamInfo::new(ParamId::EnvMod, "Env Mod")
        .range(0.0, 100.0)
        .default(25.0)
        .unit(ParamUnit::Percent),
    ParamInfo::new(ParamId::Decay, "Decay")
        .range(200.0, 2000.0)
        .default(400.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::Accent, "Accent")
        .range(0.0, 100.0)
        .default(50.0)
        .unit(ParamUnit::Percent),
    ParamInfo::new(ParamId::Volume, "Volume")
        .range(-60.0, 0.0)
        .default(-12.0)
        .unit(ParamUnit::Db),
    ParamInfo::new(ParamId::AmpSustain, "Amp Sustain")
        .range(-60.0, 0.0)
        .default(-60.0)
        .unit(ParamUnit::Db),
    ParamInfo::new(ParamId::AmpDecay, "Amp Decay")
        .range(200.0, 4000.0)
        .default(1230.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::AmpRelease, "Amp Release")
        .range(0.5, 50.0)
        .default(0.5)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::FeedbackHighpass, "Feedback HPF")
        .range(10.0, 500.0)
        .default(150.0)
        .unit(ParamUnit::Hz),
    ParamInfo::new(ParamId::NormalAttack, "Normal Attack")
        .range(0.3, 30.0)
        .default(3.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::AccentAttack, "Accent Attack")
        .range(0.3, 30.0)
        .default(3.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::AccentDecay, "Accent Decay")
        .range(30.0, 3000.0)
        .default(200.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::SlideTime, "Slide Time")
        .range(1.0, 500.0)
        .default(60.0)
        .unit(ParamUnit::Ms),
    ParamInfo::new(ParamId::Drive, "Drive")
        .range(0.0, 48.0)
        .default(0.0)
        .unit(ParamUnit::Db),
];

#[inline]
pub fn param_info(id: ParamId) -> &'static ParamInfo {
    &PARAM_INFO[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_ids() {
        for (index, info) in PARAM_INFO.iter().enumerate() {
            assert_eq!(info.id as usize, index, "{} is out of order", info.name);
        }
    }

    #[test]
    fn test_defaults_inside_range() {
        for info in &PARAM_INFO {
            assert!(info.contains(info.default), "{} default out of range", info.name);
        }
    }

    #[test]
    fn test_format() {
        assert_eq!(param_info(ParamId::Cutoff).format(1000.0), "1000.00 Hz");
        assert_eq!(param_info(ParamId::Waveform).format(0.5), "0.50");
    }
}
