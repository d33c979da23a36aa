// src/scheduler.rs
//
// The two processing cadences. One is picked when the unit is built and
// stored as a plain function pointer, so a processing call never branches
// on the cadence.

use std::fmt;

use crate::engine::ControlState;
use crate::inputs::BlockInputs;
use crate::modulation::{ControlSignal, InputRate};
use crate::parameter::{BLOCK_RATE_PARAMS, ParamId, SAMPLE_RATE_PARAMS};
use crate::synth::SynthEngine;

/// How often control logic is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessMode {
    /// Edges, notes and the sample-rate lanes on every sample
    PerSample,

    /// Edges, notes and every lane once per block
    PerBlock,
}

impl ProcessMode {
    /// A sample-accurate gate gets sample-accurate control.
    pub fn for_gate(gate: &ControlSignal<'_>) -> Self {
        match gate.rate() {
            InputRate::Audio => ProcessMode::PerSample,
            InputRate::Control | InputRate::Constant => ProcessMode::PerBlock,
        }
    }

    /// Resolve the processing strategy for this mode.
    pub fn strategy<E: SynthEngine>(self) -> ProcessFn<E> {
        match self {
            ProcessMode::PerSample => process_per_sample::<E>,
            ProcessMode::PerBlock => process_per_block::<E>,
        }
    }
}

impl fmt::Display for ProcessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessMode::PerSample => write!(f, "per-sample"),
            ProcessMode::PerBlock => write!(f, "per-block"),
        }
    }
}

/// One processing call: control state, engine, this block's lanes, output.
pub type ProcessFn<E> = fn(&mut ControlState, &mut E, &BlockInputs<'_>, &mut [f32]);

/// Per-sample strategy.
///
/// For every frame: edges, note control and the sample-rate lanes run
/// before that frame's sample is pulled.
pub fn process_per_sample<E: SynthEngine>(
    state: &mut ControlState,
    engine: &mut E,
    inputs: &BlockInputs<'_>,
    output: &mut [f32],
) {
    if state.slow_param_refresh() {
        state.update_params(engine, &BLOCK_RATE_PARAMS, |id| {
            inputs.param_signal(id).value_control()
        });
    }

    for (frame, out) in output.iter_mut().enumerate() {
        state.control_tick(
            engine,
            inputs.gate.value_audio(frame),
            inputs.trigger.value_audio(frame),
            inputs.note.value_audio(frame),
            inputs.velocity.value_audio(frame),
        );
        state.update_params(engine, &SAMPLE_RATE_PARAMS, |id| {
            inputs.param_signal(id).value_audio(frame)
        });
        *out = engine.pull_sample();
    }
}

/// Per-block strategy.
///
/// Control logic runs once, even for an empty block; the engine is then
/// pulled for every frame with nothing interleaved.
pub fn process_per_block<E: SynthEngine>(
    state: &mut ControlState,
    engine: &mut E,
    inputs: &BlockInputs<'_>,
    output: &mut [f32],
) {
    state.control_tick(
        engine,
        inputs.gate.value_control(),
        inputs.trigger.value_control(),
        inputs.note.value_control(),
        inputs.velocity.value_control(),
    );
    state.update_params(engine, &ParamId::ALL, |id| {
        inputs.param_signal(id).value_control()
    });

    for out in output.iter_mut() {
        *out = engine.pull_sample();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UnitConfig;
    use crate::test::{Call, RecordingEngine};

    fn state_for(
        engine: &mut RecordingEngine,
        config: UnitConfig,
        inputs: &BlockInputs,
    ) -> ControlState {
        let state = ControlState::new(engine, &config, inputs);
        engine.clear();
        state
    }

    #[test]
    fn test_mode_follows_gate_rate() {
        let block = [0.0; 8];
        let one = [0.0];
        assert_eq!(ProcessMode::for_gate(&ControlSignal::Audio(&block)), ProcessMode::PerSample);
        assert_eq!(ProcessMode::for_gate(&ControlSignal::Control(&one)), ProcessMode::PerBlock);
        assert_eq!(ProcessMode::for_gate(&ControlSignal::Constant(1.0)), ProcessMode::PerBlock);
    }

    #[test]
    fn test_per_block_pulls_every_frame_once() {
        let mut engine = RecordingEngine::new();
        let inputs = BlockInputs::new();
        let mut state = state_for(&mut engine, UnitConfig::default(), &inputs);

        let mut out = [1.0; 32];
        process_per_block(&mut state, &mut engine, &inputs, &mut out);

        assert_eq!(engine.pulls, 32);
        assert!(engine.lifecycle().is_empty());
        assert!(engine.params().is_empty());
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_per_block_dispatches_before_pulling() {
        let mut engine = RecordingEngine::new();
        let mut state = state_for(&mut engine, UnitConfig::default(), &BlockInputs::new());

        let gate_on = BlockInputs::new().gate(ControlSignal::Constant(1.0));
        process_per_block(&mut state, &mut engine, &gate_on, &mut [0.0; 4]);

        assert_eq!(
            engine.calls,
            vec![
                Call::Retrigger(60, 127),
                Call::Pull,
                Call::Pull,
                Call::Pull,
                Call::Pull,
            ]
        );
    }

    #[test]
    fn test_per_block_checks_every_lane() {
        let mut engine = RecordingEngine::new();
        let inputs = BlockInputs::new();
        let mut state = state_for(&mut engine, UnitConfig::default(), &inputs);

        let moved = inputs
            .param(ParamId::Tuning, ControlSignal::Constant(442.0))
            .param(ParamId::SlideTime, ControlSignal::Constant(90.0));
        process_per_block(&mut state, &mut engine, &moved, &mut [0.0; 4]);

        assert_eq!(
            engine.params(),
            vec![
                Call::Param(ParamId::Tuning, 442.0),
                Call::Param(ParamId::SlideTime, 90.0),
            ]
        );
    }

    #[test]
    fn test_per_sample_reads_each_frame() {
        let gate = [0.0, 1.0, 1.0, 1.0];
        let cutoff = [500.0, 500.0, 700.0, 700.0];
        let inputs = BlockInputs::new()
            .gate(ControlSignal::Audio(&gate))
            .param(ParamId::Cutoff, ControlSignal::Audio(&cutoff));

        let mut engine = RecordingEngine::new();
        let mut state = state_for(&mut engine, UnitConfig::default(), &inputs);

        let mut out = [0.0; 4];
        process_per_sample(&mut state, &mut engine, &inputs, &mut out);

        assert_eq!(
            engine.calls,
            vec![
                Call::Pull,
                Call::Retrigger(60, 127),
                Call::Pull,
                Call::Param(ParamId::Cutoff, 700.0),
                Call::Pull,
                Call::Pull,
            ]
        );
    }

    #[test]
    fn test_per_sample_slow_refresh() {
        let gate = [0.0; 4];
        let inputs = BlockInputs::new().gate(ControlSignal::Audio(&gate));
        let retuned = inputs.param(ParamId::Tuning, ControlSignal::Constant(430.0));

        let mut engine = RecordingEngine::new();
        let mut state = state_for(&mut engine, UnitConfig::default(), &inputs);
        process_per_sample(&mut state, &mut engine, &retuned, &mut [0.0; 4]);
        assert_eq!(engine.param_calls(ParamId::Tuning), 1);

        let frozen = UnitConfig::default().with_slow_param_refresh(false);
        let mut engine = RecordingEngine::new();
        let mut state = state_for(&mut engine, frozen, &inputs);
        process_per_sample(&mut state, &mut engine, &retuned, &mut [0.0; 4]);
        assert_eq!(engine.param_calls(ParamId::Tuning), 0);
    }
}
