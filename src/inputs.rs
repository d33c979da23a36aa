// src/inputs.rs

use crate::modulation::ControlSignal;
use crate::parameter::{PARAM_COUNT, ParamId, ParameterSet};

/// Note number read from an unconnected note lane.
pub const DEFAULT_NOTE: f32 = 60.0;

/// Normalized velocity read from an unconnected velocity lane.
pub const DEFAULT_VELOCITY: f32 = 1.0;

/// Views of every input lane for one processing call.
///
/// Borrowed from host buffers; building one never allocates.
#[derive(Debug, Clone, Copy)]
pub struct BlockInputs<'a> {
    pub gate: ControlSignal<'a>,
    pub trigger: ControlSignal<'a>,
    pub note: ControlSignal<'a>,

    /// Normalized to 0..1
    pub velocity: ControlSignal<'a>,

    /// One lane per `ParamId`, in id order
    pub params: [ControlSignal<'a>; PARAM_COUNT],
}

impl<'a> BlockInputs<'a> {
    /// Gate and trigger low, every parameter at its default.
    pub fn new() -> Self {
        Self::from_params(&ParameterSet::defaults())
    }

    /// Constant lanes holding `params`.
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut lanes = [ControlSignal::Constant(0.0); PARAM_COUNT];
        for (id, value) in params.iter() {
            lanes[id.index()] = ControlSignal::Constant(value);
        }
        Self {
            gate: ControlSignal::Constant(0.0),
            trigger: ControlSignal::Constant(0.0),
            note: ControlSignal::Constant(DEFAULT_NOTE),
            velocity: ControlSignal::Constant(DEFAULT_VELOCITY),
            params: lanes,
        }
    }

    pub fn gate(mut self, signal: ControlSignal<'a>) -> Self {
        self.gate = signal;
        self
    }

    pub fn trigger(mut self, signal: ControlSignal<'a>) -> Self {
        self.trigger = signal;
        self
    }

    pub fn note(mut self, signal: ControlSignal<'a>) -> Self {
        self.note = signal;
        self
    }

    pub fn velocity(mut self, signal: ControlSignal<'a>) -> Self {
        self.velocity = signal;
        self
    }

    pub fn param(mut self, id: ParamId, signal: ControlSignal<'a>) -> Self {
        self.params[id.index()] = signal;
        self
    }

    #[inline]
    pub fn param_signal(&self, id: ParamId) -> ControlSignal<'a> {
        self.params[id.index()]
    }
}

impl Default for BlockInputs<'_> {
    fn default() -> Self {
        Self::new()
    }
}
