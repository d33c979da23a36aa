//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { acidline_init, AcidlineConfig, AcidlineUnit } from './acidline.js';
//!
//! await init();
//! acidline_init();
//!
//! // Any object with setSampleRate, setParam, retrigger, glide, release
//! // and pullSample methods can act as the engine.
//! const unit = new AcidlineUnit(new AcidlineConfig(), voice, gate, trig, note, vel, params);
//!
//! // In the AudioWorklet: an empty lane reads its default, a one-element
//! // lane is held for the block and a longer lane is read per sample.
//! unit.process(gate, trig, note, vel, params, output);
//! ```

use wasm_bindgen::prelude::*;

use crate::engine::ControlUnit;
use crate::inputs::{BlockInputs, DEFAULT_NOTE, DEFAULT_VELOCITY};
use crate::modulation::ControlSignal;
use crate::parameter::{PARAM_COUNT, ParamId};
use crate::scheduler::ProcessMode;
use crate::state::{LaneLayout, UnitConfig, param_info};
use crate::synth::SynthEngine;

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn acidline_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a unit.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct AcidlineConfig {
    /// Sample rate in Hz (e.g., 44100.0, 48000.0).
    pub sample_rate: f64,
    /// Read the trigger lane.
    pub trigger_lane: bool,
    /// Read and forward the drive lane.
    pub drive_lane: bool,
    /// Check block-rate lanes once per block in per-sample mode.
    pub slow_param_refresh: bool,
}

#[wasm_bindgen]
impl AcidlineConfig {
    /// Create a new configuration with default values.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with custom values.
    pub fn with_values(sample_rate: f64, trigger_lane: bool, drive_lane: bool) -> Self {
        Self {
            sample_rate,
            trigger_lane,
            drive_lane,
            ..Self::default()
        }
    }
}

impl Default for AcidlineConfig {
    fn default() -> Self {
        let config = UnitConfig::default();
        Self {
            sample_rate: config.sample_rate,
            trigger_lane: config.layout.trigger,
            drive_lane: config.layout.drive,
            slow_param_refresh: config.slow_param_refresh,
        }
    }
}

impl From<AcidlineConfig> for UnitConfig {
    fn from(c: AcidlineConfig) -> Self {
        UnitConfig::new(c.sample_rate)
            .with_layout(LaneLayout {
                trigger: c.trigger_lane,
                drive: c.drive_lane,
            })
            .with_slow_param_refresh(c.slow_param_refresh)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Host Engine
// ═══════════════════════════════════════════════════════════════════════════

#[wasm_bindgen]
extern "C" {
    /// Synth voice implemented in JavaScript.
    pub type JsSynthEngine;

    #[wasm_bindgen(method, js_name = setSampleRate)]
    fn js_set_sample_rate(this: &JsSynthEngine, sample_rate: f64);

    #[wasm_bindgen(method, js_name = setParam)]
    fn js_set_param(this: &JsSynthEngine, param_id: u32, value: f32);

    #[wasm_bindgen(method, js_name = retrigger)]
    fn js_retrigger(this: &JsSynthEngine, note: i32, velocity: i32);

    #[wasm_bindgen(method, js_name = glide)]
    fn js_glide(this: &JsSynthEngine, note: i32, velocity: i32, time: f64);

    #[wasm_bindgen(method, js_name = release)]
    fn js_release(this: &JsSynthEngine, note: i32, velocity: i32, time: f64);

    #[wasm_bindgen(method, js_name = pullSample)]
    fn js_pull_sample(this: &JsSynthEngine) -> f32;
}

struct HostEngine {
    inner: JsSynthEngine,
}

impl SynthEngine for HostEngine {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.inner.js_set_sample_rate(sample_rate);
    }

    fn set_param(&mut self, param: ParamId, value: f32) {
        self.inner.js_set_param(param as u32, value);
    }

    fn retrigger(&mut self, note: i32, velocity: i32) {
        self.inner.js_retrigger(note, velocity);
    }

    fn glide(&mut self, note: i32, velocity: i32, time: f64) {
        self.inner.js_glide(note, velocity, time);
    }

    fn release(&mut self, note: i32, velocity: i32, time: f64) {
        self.inner.js_release(note, velocity, time);
    }

    fn pull_sample(&mut self) -> f32 {
        self.inner.js_pull_sample()
    }
}

/// Lanes from JS arrays. `params` holds one block-rate value per parameter
/// id; missing entries read the parameter's default.
fn block_inputs<'a>(
    gate: &'a [f32],
    trigger: &'a [f32],
    note: &'a [f32],
    velocity: &'a [f32],
    params: &[f32],
) -> BlockInputs<'a> {
    let mut inputs = BlockInputs::new()
        .gate(ControlSignal::from_slice_or(gate, 0.0))
        .trigger(ControlSignal::from_slice_or(trigger, 0.0))
        .note(ControlSignal::from_slice_or(note, DEFAULT_NOTE))
        .velocity(ControlSignal::from_slice_or(velocity, DEFAULT_VELOCITY));
    for (i, &value) in params.iter().take(PARAM_COUNT).enumerate() {
        inputs.params[i] = ControlSignal::Constant(value);
    }
    inputs
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit
// ═══════════════════════════════════════════════════════════════════════════

/// Control front end driving a JavaScript synth voice.
#[wasm_bindgen]
pub struct AcidlineUnit {
    inner: ControlUnit<HostEngine>,
}

#[wasm_bindgen]
impl AcidlineUnit {
    /// Create a unit from the first block of inputs. The gate lane's shape
    /// here fixes the processing cadence for the unit's lifetime.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: &AcidlineConfig,
        engine: JsSynthEngine,
        gate: &[f32],
        trigger: &[f32],
        note: &[f32],
        velocity: &[f32],
        params: &[f32],
    ) -> Result<AcidlineUnit, JsError> {
        let inputs = block_inputs(gate, trigger, note, velocity, params);
        let inner = ControlUnit::new(HostEngine { inner: engine }, (*config).into(), &inputs)?;
        Ok(Self { inner })
    }

    /// Render `output.length` samples.
    pub fn process(
        &mut self,
        gate: &[f32],
        trigger: &[f32],
        note: &[f32],
        velocity: &[f32],
        params: &[f32],
        output: &mut [f32],
    ) {
        let inputs = block_inputs(gate, trigger, note, velocity, params);
        self.inner.process(&inputs, output);
    }

    /// Note currently held, or -1 when idle.
    pub fn current_note(&self) -> i32 {
        self.inner.note_state().note().unwrap_or(-1)
    }

    pub fn is_sample_accurate(&self) -> bool {
        self.inner.mode() == ProcessMode::PerSample
    }

    /// Last value sent to the engine for a parameter id.
    pub fn param_value(&self, param_id: u32) -> Option<f32> {
        ParamId::from_index(param_id).map(|id| self.inner.param_value(id))
    }
}

/// Number of parameter slots `process` reads.
#[wasm_bindgen(js_name = paramCount)]
pub fn param_count() -> u32 {
    PARAM_COUNT as u32
}

/// Nominal default for a parameter id.
#[wasm_bindgen(js_name = paramDefault)]
pub fn param_default(param_id: u32) -> Option<f32> {
    ParamId::from_index(param_id).map(|id| param_info(id).default)
}

#[cfg(all(test, feature = "web"))]
mod tests {
    use super::*;

    #[test]
    fn test_block_inputs_lane_shapes() {
        let gate = [0.0, 1.0, 1.0];
        let note = [48.0];
        let params = [0.5, 432.0];
        let inputs = block_inputs(&gate, &[], &note, &[], &params);

        assert_eq!(ProcessMode::for_gate(&inputs.gate), ProcessMode::PerSample);
        assert_eq!(inputs.trigger.value_control(), 0.0);
        assert_eq!(inputs.note.value_control(), 48.0);
        assert_eq!(inputs.velocity.value_control(), DEFAULT_VELOCITY);
        assert_eq!(inputs.param_signal(ParamId::Waveform).value_control(), 0.5);
        assert_eq!(inputs.param_signal(ParamId::Tuning).value_control(), 432.0);
        assert_eq!(
            inputs.param_signal(ParamId::Cutoff).value_control(),
            param_info(ParamId::Cutoff).default
        );
    }

    #[test]
    fn test_extra_params_are_ignored() {
        let params = [1.0; PARAM_COUNT + 3];
        let inputs = block_inputs(&[], &[], &[], &[], &params);
        assert_eq!(inputs.param_signal(ParamId::Drive).value_control(), 1.0);
    }
}
