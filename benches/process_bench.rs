//! Criterion benchmarks for the control front end
//!
//! Run with: cargo bench
//!
//! A null engine isolates the cost of edge detection, note decisions and
//! parameter change checks from any synthesis work.

use acidline::{BlockInputs, ControlSignal, ControlUnit, ParamId, SynthEngine, UnitConfig};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f64 = 48000.0;
const BLOCK_SIZES: [usize; 3] = [64, 128, 512];

/// Accepts every call and renders silence
struct NullEngine;

impl SynthEngine for NullEngine {
    fn set_sample_rate(&mut self, _sample_rate: f64) {}
    fn set_param(&mut self, param: ParamId, value: f32) {
        black_box((param, value));
    }
    fn retrigger(&mut self, note: i32, velocity: i32) {
        black_box((note, velocity));
    }
    fn glide(&mut self, note: i32, velocity: i32, _time: f64) {
        black_box((note, velocity));
    }
    fn release(&mut self, note: i32, _velocity: i32, _time: f64) {
        black_box(note);
    }
    fn pull_sample(&mut self) -> f32 {
        0.0
    }
}

fn bench_per_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_block");
    for &frames in &BLOCK_SIZES {
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &frames, |b, &frames| {
            let first = BlockInputs::new();
            let config = UnitConfig::new(SAMPLE_RATE);
            let mut unit = match ControlUnit::new(NullEngine, config, &first) {
                Ok(unit) => unit,
                Err(e) => panic!("unit: {}", e),
            };
            let mut out = vec![0.0f32; frames];
            let mut step = 0u32;
            b.iter(|| {
                // Gate toggles and cutoff moves every other block
                step = step.wrapping_add(1);
                let gate = (step & 1) as f32;
                let inputs = BlockInputs::new()
                    .gate(ControlSignal::Constant(gate))
                    .note(ControlSignal::Constant(36.0 + (step % 12) as f32))
                    .param(ParamId::Cutoff, ControlSignal::Constant(500.0 + (step % 2) as f32));
                unit.process(black_box(&inputs), &mut out);
                black_box(out[0]);
            });
        });
    }
    group.finish();
}

fn bench_per_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_sample");
    for &frames in &BLOCK_SIZES {
        let mut gate = vec![0.0f32; frames];
        for (i, v) in gate.iter_mut().enumerate() {
            *v = if (i / 16) % 2 == 0 { 1.0 } else { 0.0 };
        }
        let cutoff: Vec<f32> = (0..frames).map(|i| 200.0 + i as f32).collect();
        let note: Vec<f32> = (0..frames).map(|i| 36.0 + (i / 32 % 12) as f32).collect();
        let silent = vec![0.0f32; frames];

        for refresh in [true, false] {
            group.throughput(Throughput::Elements(frames as u64));
            let label = if refresh { "slow_refresh" } else { "fast_lanes_only" };
            let id = BenchmarkId::new(label, frames);
            group.bench_function(id, |b| {
                let config = UnitConfig::new(SAMPLE_RATE).with_slow_param_refresh(refresh);
                let first = BlockInputs::new().gate(ControlSignal::Audio(&silent));
                let mut unit = match ControlUnit::new(NullEngine, config, &first) {
                    Ok(unit) => unit,
                    Err(e) => panic!("unit: {}", e),
                };
                let inputs = BlockInputs::new()
                    .gate(ControlSignal::Audio(&gate))
                    .note(ControlSignal::Audio(&note))
                    .param(ParamId::Cutoff, ControlSignal::Audio(&cutoff));
                let mut out = vec![0.0f32; frames];
                b.iter(|| {
                    unit.process(black_box(&inputs), &mut out);
                    black_box(out[0]);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_per_block, bench_per_sample);
criterion_main!(benches);
