// src/main.rs
//
// Sanity run: drives a control unit through a short bass line in both
// processing modes and prints what the engine receives.

use acidline::{
    BlockInputs, ControlSignal, ControlUnit, ParamId, SynthEngine, UnitConfig, param_info,
};

/// ===============================
/// Test Engine
/// ===============================

/// Prints lifecycle calls and renders a bare saw at the held pitch.
struct PrintingEngine {
    sample_rate: f32,
    tuning: f32,
    phase: f32,
    freq: f32,
    gain: f32,
    lifecycle_calls: usize,
    param_calls: usize,
}

impl PrintingEngine {
    fn new() -> Self {
        Self {
            sample_rate: 48_000.0,
            tuning: 440.0,
            phase: 0.0,
            freq: 0.0,
            gain: 0.0,
            lifecycle_calls: 0,
            param_calls: 0,
        }
    }

    fn note_freq(&self, note: i32) -> f32 {
        self.tuning * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
    }
}

impl SynthEngine for PrintingEngine {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate as f32;
    }

    fn set_param(&mut self, param: ParamId, value: f32) {
        self.param_calls += 1;
        if param == ParamId::Tuning {
            self.tuning = value;
        }
        println!("  set {:<14} {}", param.name(), param_info(param).format(value));
    }

    fn retrigger(&mut self, note: i32, velocity: i32) {
        self.lifecycle_calls += 1;
        self.freq = self.note_freq(note);
        self.gain = velocity as f32 / 127.0;
        println!("  retrigger note={} velocity={}", note, velocity);
    }

    fn glide(&mut self, note: i32, velocity: i32, time: f64) {
        self.lifecycle_calls += 1;
        self.freq = self.note_freq(note);
        println!("  glide     note={} velocity={} time={}", note, velocity, time);
    }

    fn release(&mut self, note: i32, velocity: i32, time: f64) {
        self.lifecycle_calls += 1;
        self.gain = 0.0;
        println!("  release   note={} velocity={} time={}", note, velocity, time);
    }

    fn pull_sample(&mut self) -> f32 {
        self.phase = (self.phase + self.freq / self.sample_rate).fract();
        (self.phase * 2.0 - 1.0) * self.gain
    }
}

/// ===============================
/// Main
/// ===============================

// (gate, trigger, note, cutoff) per block
const PATTERN: [(f32, f32, f32, f32); 8] = [
    (1.0, 0.0, 36.0, 800.0),
    (1.0, 0.0, 36.0, 900.0),
    (1.0, 0.0, 48.0, 1000.0),
    (0.0, 0.0, 48.0, 1000.0),
    (1.0, 0.0, 39.0, 1100.0),
    (1.0, 1.0, 39.0, 1100.0),
    (1.0, 0.0, 41.0, 1200.0),
    (0.0, 0.0, 41.0, 1200.0),
];

const BLOCK_FRAMES: usize = 128;

fn main() {
    println!("Starting control unit sanity test…");

    // --------------------------------
    // Per-block: block-rate gate
    // --------------------------------

    println!("--- per-block ---");
    let mut engine = PrintingEngine::new();
    let first = BlockInputs::new();
    let mut unit = match ControlUnit::new(&mut engine, UnitConfig::default(), &first) {
        Ok(unit) => unit,
        Err(e) => {
            println!("Error creating unit: {}", e);
            return;
        }
    };

    let mut out = [0.0f32; BLOCK_FRAMES];
    for (block, &(gate, trigger, note, cutoff)) in PATTERN.iter().enumerate() {
        println!("block {}", block);
        let inputs = BlockInputs::new()
            .gate(ControlSignal::Constant(gate))
            .trigger(ControlSignal::Constant(trigger))
            .note(ControlSignal::Constant(note))
            .param(ParamId::Cutoff, ControlSignal::Constant(cutoff));
        unit.process(&inputs, &mut out);
    }
    let mode = unit.mode();
    drop(unit);
    println!(
        "{}: {} lifecycle calls, {} parameter calls",
        mode, engine.lifecycle_calls, engine.param_calls
    );

    // --------------------------------
    // Per-sample: audio-rate gate with a mid-block edge
    // --------------------------------

    println!("--- per-sample ---");
    let mut engine = PrintingEngine::new();
    let low = [0.0f32; BLOCK_FRAMES];
    let first = BlockInputs::new().gate(ControlSignal::Audio(&low));
    let mut unit = match ControlUnit::new(&mut engine, UnitConfig::default(), &first) {
        Ok(unit) => unit,
        Err(e) => {
            println!("Error creating unit: {}", e);
            return;
        }
    };

    let mut gate = [0.0f32; BLOCK_FRAMES];
    gate[BLOCK_FRAMES / 4..BLOCK_FRAMES * 3 / 4].fill(1.0);
    let mut sweep = [0.0f32; BLOCK_FRAMES];
    for (i, v) in sweep.iter_mut().enumerate() {
        *v = 400.0 + (i / 32) as f32 * 100.0;
    }
    let inputs = BlockInputs::new()
        .gate(ControlSignal::Audio(&gate))
        .note(ControlSignal::Constant(45.0))
        .param(ParamId::Cutoff, ControlSignal::Audio(&sweep));
    unit.process(&inputs, &mut out);

    let mode = unit.mode();
    drop(unit);
    let peak = out.iter().fold(0.0f32, |p, s| p.max(s.abs()));
    println!(
        "{}: {} lifecycle calls, {} parameter calls, peak {:.3}",
        mode, engine.lifecycle_calls, engine.param_calls, peak
    );

    println!("Sanity test completed.");
}
