// src/engine.rs

use crate::edge::{Edge, EdgeDetector, is_high};
use crate::error::Result;
use crate::event::NoteAction;
use crate::inputs::BlockInputs;
use crate::note::{NoteController, TickInput};
use crate::parameter::{ParamId, ParameterCache};
use crate::scheduler::{ProcessFn, ProcessMode};
use crate::state::UnitConfig;
use crate::synth::SynthEngine;
use crate::voice::NoteState;

/// All mutable control state of one unit.
///
/// Owned by exactly one `ControlUnit` and handed to the processing
/// strategy by exclusive reference; nothing else can reach it.
#[derive(Debug, Clone)]
pub struct ControlState {
    gate: EdgeDetector,

    /// `None` when the layout has no trigger lane
    trigger: Option<EdgeDetector>,

    notes: NoteController,
    params: ParameterCache,
    slow_param_refresh: bool,
}

impl ControlState {
    /// Seed every detector from the first readings and push every active
    /// parameter lane to the engine.
    pub fn new<E: SynthEngine>(
        engine: &mut E,
        config: &UnitConfig,
        inputs: &BlockInputs<'_>,
    ) -> Self {
        let params = ParameterCache::prime(engine, config.layout, |id| {
            inputs.param_signal(id).value_control()
        });

        Self {
            gate: EdgeDetector::new(inputs.gate.value_control()),
            trigger: config
                .layout
                .trigger
                .then(|| EdgeDetector::new(inputs.trigger.value_control())),
            notes: NoteController::new(inputs.note.value_control()),
            params,
            slow_param_refresh: config.slow_param_refresh,
        }
    }

    /// Edge detection and note control for one tick.
    ///
    /// Any resulting action reaches the engine before this returns.
    #[inline]
    pub fn control_tick<E: SynthEngine>(
        &mut self,
        engine: &mut E,
        gate: f32,
        trigger: f32,
        note: f32,
        velocity: f32,
    ) -> Option<NoteAction> {
        let gate_edge = self.gate.process(gate);
        let trigger_edge = match self.trigger.as_mut() {
            Some(detector) => detector.process(trigger),
            None => Edge::None,
        };

        let action = self.notes.tick(&TickInput {
            gate: gate_edge,
            gate_high: is_high(gate),
            trigger: trigger_edge,
            note,
            velocity,
        });
        if let Some(action) = action {
            action.dispatch(engine);
        }
        action
    }

    #[inline]
    pub fn update_params<E: SynthEngine>(
        &mut self,
        engine: &mut E,
        ids: &[ParamId],
        read: impl FnMut(ParamId) -> f32,
    ) -> usize {
        self.params.update_set(engine, ids, read)
    }

    #[inline]
    pub fn slow_param_refresh(&self) -> bool {
        self.slow_param_refresh
    }

    #[inline]
    pub fn note_state(&self) -> NoteState {
        self.notes.state()
    }

    pub fn params(&self) -> &ParameterCache {
        &self.params
    }
}

/// Real-time control unit driving one synthesis engine.
///
/// `process` runs on the audio thread.
/// It must be deterministic, allocation-free, and lock-free.
pub struct ControlUnit<E: SynthEngine> {
    engine: E,
    state: ControlState,
    mode: ProcessMode,
    process_fn: ProcessFn<E>,
    config: UnitConfig,
}

impl<E: SynthEngine> ControlUnit<E> {
    /// Build a unit from the first available block of inputs.
    ///
    /// Every active lane is pushed to the engine once; the processing
    /// cadence is fixed here from the gate lane's rate.
    pub fn new(mut engine: E, config: UnitConfig, inputs: &BlockInputs<'_>) -> Result<Self> {
        config.validate()?;

        engine.set_sample_rate(config.sample_rate);
        let state = ControlState::new(&mut engine, &config, inputs);
        let mode = ProcessMode::for_gate(&inputs.gate);

        log::info!(
            "control unit ready: {} at {} Hz, {}",
            mode,
            config.sample_rate,
            config.layout
        );

        Ok(Self {
            engine,
            state,
            mode,
            process_fn: mode.strategy::<E>(),
            config,
        })
    }

    /// Process one block; `output.len()` is the block size.
    ///
    /// Called once per audio callback. It must not allocate or block.
    #[inline]
    pub fn process(&mut self, inputs: &BlockInputs<'_>, output: &mut [f32]) {
        (self.process_fn)(&mut self.state, &mut self.engine, inputs, output);
    }

    pub fn mode(&self) -> ProcessMode {
        self.mode
    }

    pub fn note_state(&self) -> NoteState {
        self.state.note_state()
    }

    /// Last value sent to the engine for a lane.
    pub fn param_value(&self, id: ParamId) -> f32 {
        self.state.params().value(id)
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnitError;
    use crate::modulation::ControlSignal;
    use crate::parameter::PARAM_COUNT;
    use crate::state::LaneLayout;
    use crate::test::{Call, RecordingEngine};

    #[test]
    fn test_construction_primes_engine() {
        let inputs = BlockInputs::new().param(ParamId::Cutoff, ControlSignal::Constant(800.0));
        let unit =
            ControlUnit::new(RecordingEngine::new(), UnitConfig::new(44_100.0), &inputs).unwrap();

        let calls = &unit.engine().calls;
        assert_eq!(calls[0], Call::SampleRate(44_100.0));
        assert_eq!(calls.len(), 1 + PARAM_COUNT - 1);
        assert!(calls.contains(&Call::Param(ParamId::Cutoff, 800.0)));
        assert_eq!(unit.param_value(ParamId::Cutoff), 800.0);
        assert_eq!(unit.note_state(), NoteState::Idle);
    }

    #[test]
    fn test_invalid_sample_rate_is_fatal() {
        let result =
            ControlUnit::new(RecordingEngine::new(), UnitConfig::new(0.0), &BlockInputs::new());
        assert!(matches!(result, Err(UnitError::InvalidSampleRate(_))));
    }

    #[test]
    fn test_mode_fixed_at_construction() {
        let gate = [0.0; 16];
        let audio = BlockInputs::new().gate(ControlSignal::Audio(&gate));
        let unit = ControlUnit::new(RecordingEngine::new(), UnitConfig::default(), &audio).unwrap();
        assert_eq!(unit.mode(), ProcessMode::PerSample);

        let unit =
            ControlUnit::new(RecordingEngine::new(), UnitConfig::default(), &BlockInputs::new())
                .unwrap();
        assert_eq!(unit.mode(), ProcessMode::PerBlock);
    }

    #[test]
    fn test_gate_high_at_construction_is_not_an_edge() {
        let inputs = BlockInputs::new()
            .gate(ControlSignal::Constant(1.0))
            .trigger(ControlSignal::Constant(1.0));
        let mut unit =
            ControlUnit::new(RecordingEngine::new(), UnitConfig::default(), &inputs).unwrap();
        unit.engine_mut().clear();

        unit.process(&inputs, &mut [0.0; 8]);
        assert!(unit.engine().lifecycle().is_empty());
    }

    #[test]
    fn test_gate_only_layout_ignores_trigger() {
        let config = UnitConfig::default().with_layout(LaneLayout::GATE_ONLY);
        let held = BlockInputs::new().gate(ControlSignal::Constant(1.0));
        let mut unit = ControlUnit::new(RecordingEngine::new(), config, &held).unwrap();

        let pulsed = held.trigger(ControlSignal::Constant(1.0));
        unit.process(&pulsed, &mut [0.0; 8]);
        assert!(unit.engine().lifecycle().is_empty());
    }

    #[test]
    fn test_drive_layout_forwards_drive() {
        let config = UnitConfig::default().with_layout(LaneLayout::WITH_DRIVE);
        let inputs = BlockInputs::new();
        let mut unit = ControlUnit::new(RecordingEngine::new(), config, &inputs).unwrap();
        assert_eq!(unit.engine().param_calls(ParamId::Drive), 1);

        let driven = inputs.param(ParamId::Drive, ControlSignal::Constant(18.0));
        unit.process(&driven, &mut [0.0; 8]);
        assert_eq!(unit.engine().param_calls(ParamId::Drive), 2);
        assert_eq!(unit.param_value(ParamId::Drive), 18.0);
    }
}
