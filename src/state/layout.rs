// src/state/layout.rs
//
// Which lanes a unit instance reads.

use std::fmt;

use crate::parameter::ParamId;

/// Lane layout of one unit instance.
///
/// Some hosts wire no dedicated trigger lane and retrigger only on gate
/// edges; others add a drive (distortion/gain) stage after the voice.
/// Lanes that are not part of the layout are never read or dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    /// A separate trigger lane forces re-articulation while gate is held
    pub trigger: bool,

    /// The drive lane is forwarded to the engine
    pub drive: bool,
}

impl LaneLayout {
    /// Gate + trigger, sixteen parameter lanes.
    pub const STANDARD: LaneLayout = LaneLayout {
        trigger: true,
        drive: false,
    };

    /// Gate edges only.
    pub const GATE_ONLY: LaneLayout = LaneLayout {
        trigger: false,
        drive: false,
    };

    /// Gate + trigger with the drive lane.
    pub const WITH_DRIVE: LaneLayout = LaneLayout {
        trigger: true,
        drive: true,
    };

    #[inline]
    pub fn has_param(&self, id: ParamId) -> bool {
        match id {
            ParamId::Drive => self.drive,
            _ => true,
        }
    }

    /// Number of parameter lanes this layout forwards.
    pub fn param_count(&self) -> usize {
        ParamId::ALL.iter().filter(|&&id| self.has_param(id)).count()
    }
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for LaneLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gate{}, {} params{}",
            if self.trigger { "+trigger" } else { "" },
            self.param_count(),
            if self.drive { " (drive)" } else { "" }
        )
    }
}
