// src/event.rs

use crate::synth::SynthEngine;

/// Velocity sent with every release.
pub const RELEASE_VELOCITY: i32 = 0;

/// Glide and release times used by the control layer (immediate).
pub const LEGATO_TIME: f64 = 0.0;

/// Note number and velocity sampled on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchEvent {
    pub note: i32,
    pub velocity: i32,
}

impl PitchEvent {
    /// Derive from the raw note lane and the normalized velocity lane.
    ///
    /// Both truncate toward zero. Out-of-range values are passed through
    /// for the engine to deal with; NaN reads as 0.
    #[inline]
    pub fn from_raw(note: f32, velocity: f32) -> Self {
        Self {
            note: note as i32,
            velocity: (velocity * 127.0) as i32,
        }
    }
}

/// A note-lifecycle action decided for one tick.
///
/// These actions:
/// - are RT-safe (plain data)
/// - are produced by the note controller
/// - are dispatched to the engine exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    /// Restart envelopes at a new pitch and velocity.
    Retrigger(PitchEvent),

    /// Legato pitch change.
    Glide(PitchEvent),

    /// End the held note.
    Release { note: i32 },
}

impl NoteAction {
    #[inline]
    pub fn dispatch<E: SynthEngine>(self, engine: &mut E) {
        match self {
            NoteAction::Retrigger(pitch) => engine.retrigger(pitch.note, pitch.velocity),
            NoteAction::Glide(pitch) => engine.glide(pitch.note, pitch.velocity, LEGATO_TIME),
            NoteAction::Release { note } => engine.release(note, RELEASE_VELOCITY, LEGATO_TIME),
        }
    }
}
