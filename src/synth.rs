// src/synth.rs

use crate::parameter::ParamId;

/// The synthesis engine driven by a control unit.
///
/// Implementations:
/// - do NOT know about gates, triggers or edges
/// - do NOT allocate or block in any method
/// - ONLY react to the calls below and produce samples on demand
///
/// The control unit is the only caller and never calls concurrently.
pub trait SynthEngine {
    /// Called once while the unit is constructed.
    fn set_sample_rate(&mut self, sample_rate: f64);

    /// Set a parameter value.
    ///
    /// Every lane has its own setter semantics; a call for one lane must
    /// not affect any other lane.
    fn set_param(&mut self, param: ParamId, value: f32);

    /// Restart the envelopes at a new note, keeping any pitch slide that
    /// is already in flight.
    fn retrigger(&mut self, note: i32, velocity: i32);

    /// Move the pitch to `note` without restarting the envelopes.
    fn glide(&mut self, note: i32, velocity: i32, time: f64);

    /// End the sounding note.
    fn release(&mut self, note: i32, velocity: i32, time: f64);

    /// Produce the next output sample.
    fn pull_sample(&mut self) -> f32;
}

impl<E: SynthEngine + ?Sized> SynthEngine for &mut E {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        (**self).set_sample_rate(sample_rate);
    }

    fn set_param(&mut self, param: ParamId, value: f32) {
        (**self).set_param(param, value);
    }

    fn retrigger(&mut self, note: i32, velocity: i32) {
        (**self).retrigger(note, velocity);
    }

    fn glide(&mut self, note: i32, velocity: i32, time: f64) {
        (**self).glide(note, velocity, time);
    }

    fn release(&mut self, note: i32, velocity: i32, time: f64) {
        (**self).release(note, velocity, time);
    }

    #[inline]
    fn pull_sample(&mut self) -> f32 {
        (**self).pull_sample()
    }
}
