// src/lib.rs
//
// Library entry point for Rust, C (iOS/Swift) and WebAssembly consumers.

mod edge;
mod engine;
mod error;
mod event;
mod inputs;
mod modulation;
mod note;
mod parameter;
mod scheduler;
mod state;
mod synth;
mod voice;

pub mod ffi;

#[cfg(feature = "web")]
pub mod wasm;


// Re-export key types for Rust consumers
pub use edge::{Edge, EdgeDetector, GATE_THRESHOLD};
pub use engine::{ControlState, ControlUnit};
pub use error::{Result, UnitError};
pub use event::{NoteAction, PitchEvent};
pub use inputs::BlockInputs;
pub use modulation::{ControlSignal, InputRate};
pub use note::{NOTE_RULES, NoteController, NoteRule, RuleContext, RuleKind, TickInput};
pub use parameter::{
    BLOCK_RATE_PARAMS, PARAM_COUNT, ParamId, ParameterCache, ParameterSet, SAMPLE_RATE_PARAMS,
};
pub use scheduler::{ProcessFn, ProcessMode};
pub use state::{LaneLayout, ParamInfo, ParamUnit, UnitConfig, param_info};
pub use synth::SynthEngine;
pub use voice::NoteState;
