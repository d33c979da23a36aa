// src/parameter.rs

use crate::state::{LaneLayout, PARAM_INFO};
use crate::synth::SynthEngine;

/// Number of parameter lanes known to the control layer.
pub const PARAM_COUNT: usize = 17;

/// Identifies one continuous parameter lane.
///
/// The discriminant is the lane index and the id used across the C and
/// JavaScript boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ParamId {
    Waveform = 0,
    Tuning = 1,
    Cutoff = 2,
    Resonance = 3,
    EnvMod = 4,
    Decay = 5,
    Accent = 6,
    Volume = 7,
    AmpSustain = 8,
    AmpDecay = 9,
    AmpRelease = 10,
    FeedbackHighpass = 11,
    NormalAttack = 12,
    AccentAttack = 13,
    AccentDecay = 14,
    SlideTime = 15,
    /// Distortion / gain stage, only present in drive layouts
    Drive = 16,
}

impl ParamId {
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::Waveform,
        ParamId::Tuning,
        ParamId::Cutoff,
        ParamId::Resonance,
        ParamId::EnvMod,
        ParamId::Decay,
        ParamId::Accent,
        ParamId::Volume,
        ParamId::AmpSustain,
        ParamId::AmpDecay,
        ParamId::AmpRelease,
        ParamId::FeedbackHighpass,
        ParamId::NormalAttack,
        ParamId::AccentAttack,
        ParamId::AccentDecay,
        ParamId::SlideTime,
        ParamId::Drive,
    ];

    #[inline]
    pub fn from_index(index: u32) -> Option<ParamId> {
        ParamId::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn name(self) -> &'static str {
        PARAM_INFO[self.index()].name
    }
}

/// Lanes checked on every sample when gate is sample-accurate.
pub const SAMPLE_RATE_PARAMS: [ParamId; 4] = [
    ParamId::Waveform,
    ParamId::Cutoff,
    ParamId::Resonance,
    ParamId::EnvMod,
];

/// Lanes that only move at block granularity.
pub const BLOCK_RATE_PARAMS: [ParamId; PARAM_COUNT - 4] = [
    ParamId::Tuning,
    ParamId::Decay,
    ParamId::Accent,
    ParamId::Volume,
    ParamId::AmpSustain,
    ParamId::AmpDecay,
    ParamId::AmpRelease,
    ParamId::FeedbackHighpass,
    ParamId::NormalAttack,
    ParamId::AccentAttack,
    ParamId::AccentDecay,
    ParamId::SlideTime,
    ParamId::Drive,
];

/// One value per parameter lane, in `ParamId` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    values: [f32; PARAM_COUNT],
}

impl ParameterSet {
    /// Every lane at its nominal default.
    pub fn defaults() -> Self {
        let mut values = [0.0; PARAM_COUNT];
        for info in &PARAM_INFO {
            values[info.id.index()] = info.default;
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    #[inline]
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.values[id.index()] = value;
    }

    pub fn with(mut self, id: ParamId, value: f32) -> Self {
        self.set(id, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamId, f32)> + '_ {
        ParamId::ALL.iter().map(|&id| (id, self.values[id.index()]))
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Shadow copy of the last value dispatched for every lane.
///
/// Values are compared with exact float equality; a lane whose value
/// did not change costs one compare and no engine call.
#[derive(Debug, Clone)]
pub struct ParameterCache {
    sent: ParameterSet,
    active: [bool; PARAM_COUNT],
}

impl ParameterCache {
    /// Build the cache and push every active lane to the engine once,
    /// unconditionally.
    pub fn prime<E: SynthEngine>(
        engine: &mut E,
        layout: LaneLayout,
        mut read: impl FnMut(ParamId) -> f32,
    ) -> Self {
        let mut sent = ParameterSet::defaults();
        let mut active = [false; PARAM_COUNT];

        for id in ParamId::ALL {
            if !layout.has_param(id) {
                continue;
            }
            let value = read(id);
            engine.set_param(id, value);
            sent.set(id, value);
            active[id.index()] = true;
            log::debug!("primed {} = {}", id.name(), value);
        }

        Self { sent, active }
    }

    /// Forward `value` if it differs from the last dispatched one.
    ///
    /// Returns `true` if the engine setter was called.
    #[inline]
    pub fn update<E: SynthEngine>(&mut self, engine: &mut E, id: ParamId, value: f32) -> bool {
        self.active[id.index()] && self.send_if_changed(engine, id, value)
    }

    #[inline]
    fn send_if_changed<E: SynthEngine>(&mut self, engine: &mut E, id: ParamId, value: f32) -> bool {
        if value == self.sent.get(id) {
            return false;
        }
        engine.set_param(id, value);
        self.sent.set(id, value);
        true
    }

    /// Check a subset of lanes, reading each current value through `read`.
    ///
    /// Returns the number of setter calls made.
    #[inline]
    pub fn update_set<E: SynthEngine>(
        &mut self,
        engine: &mut E,
        ids: &[ParamId],
        mut read: impl FnMut(ParamId) -> f32,
    ) -> usize {
        let mut dispatched = 0;
        for &id in ids {
            // Inactive lanes are not read at all
            if self.active[id.index()] && self.send_if_changed(engine, id, read(id)) {
                dispatched += 1;
            }
        }
        dispatched
    }

    #[inline]
    pub fn is_active(&self, id: ParamId) -> bool {
        self.active[id.index()]
    }

    /// Last value dispatched for a lane.
    #[inline]
    pub fn value(&self, id: ParamId) -> f32 {
        self.sent.get(id)
    }

    pub fn values(&self) -> &ParameterSet {
        &self.sent
    }
}
