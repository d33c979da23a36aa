// src/modulation.rs

/// Delivery rate of one input lane, as seen by the control layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRate {
    /// Fixed for the whole lifetime of the unit
    Constant,

    /// One value per processing block
    Control,

    /// One value per sample
    Audio,
}

/// A read-only view of one control lane for the current block.
///
/// This is intentionally lightweight:
/// - no ownership
/// - no allocation
/// - no dynamic dispatch
///
/// Reads never panic: empty buffers read as `0.0`, and an audio-rate
/// buffer shorter than the block holds its last sample.
#[derive(Debug, Copy, Clone)]
pub enum ControlSignal<'a> {
    /// Fixed value (e.g. knob, unconnected lane)
    Constant(f32),

    /// One value per block (control-rate)
    Control(&'a [f32]),

    /// One value per sample (audio-rate)
    Audio(&'a [f32]),
}

impl<'a> ControlSignal<'a> {
    /// Classify a raw host buffer by its length.
    ///
    /// - empty: `Constant(fallback)`
    /// - one value: control-rate
    /// - more: audio-rate
    #[inline]
    pub fn from_slice_or(buf: &'a [f32], fallback: f32) -> Self {
        match buf.len() {
            0 => ControlSignal::Constant(fallback),
            1 => ControlSignal::Control(buf),
            _ => ControlSignal::Audio(buf),
        }
    }

    #[inline]
    pub fn rate(&self) -> InputRate {
        match self {
            ControlSignal::Constant(_) => InputRate::Constant,
            ControlSignal::Control(_) => InputRate::Control,
            ControlSignal::Audio(_) => InputRate::Audio,
        }
    }

    /// Evaluate at control rate (once per block)
    #[inline]
    pub fn value_control(&self) -> f32 {
        match *self {
            ControlSignal::Constant(v) => v,
            ControlSignal::Control(buf) | ControlSignal::Audio(buf) => {
                buf.first().copied().unwrap_or(0.0)
            }
        }
    }

    /// Evaluate at audio rate (per sample)
    #[inline]
    pub fn value_audio(&self, frame: usize) -> f32 {
        match *self {
            ControlSignal::Constant(v) => v,
            ControlSignal::Control(buf) => buf.first().copied().unwrap_or(0.0),
            ControlSignal::Audio(buf) => buf
                .get(frame)
                .or_else(|| buf.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

impl Default for ControlSignal<'_> {
    fn default() -> Self {
        ControlSignal::Constant(0.0)
    }
}
