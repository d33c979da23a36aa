// C-compatible FFI bindings for Swift/iOS and other native hosts.
//
// Safety requirements:
// - All pointers must be non-null unless documented otherwise
// - All handles must be created by this module and not fabricated
// - Lane pointers must stay valid for `len` floats for the duration of the call
// - Caller must call `acidline_unit_destroy` for each `acidline_unit_create`

use std::ffi::c_void;

use log::{error, info};

use crate::engine::ControlUnit;
use crate::error::{Result, UnitError};
use crate::inputs::{BlockInputs, DEFAULT_NOTE, DEFAULT_VELOCITY};
use crate::modulation::ControlSignal;
use crate::parameter::{PARAM_COUNT, ParamId};
use crate::scheduler::ProcessMode;
use crate::state::{LaneLayout, UnitConfig, param_info};
use crate::synth::SynthEngine;

// Logger subsystem identifier
#[cfg(feature = "ios")]
const LOG_SUBSYSTEM: &str = "com.acidline.engine";

// ═══════════════════════════════════════════════════════════════════════════
// Logger Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the oslog logger.
///
/// Call once at application startup, before creating any unit.
#[cfg(feature = "ios")]
#[unsafe(no_mangle)]
pub extern "C" fn acidline_init_logger() {
    oslog::OsLogger::new(LOG_SUBSYSTEM)
        .level_filter(log::LevelFilter::Debug)
        .init()
        .ok();
}

// ═══════════════════════════════════════════════════════════════════════════
// FFI Types
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration for creating a unit.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
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

/// One input lane.
///
/// - `data == NULL` or `len == 0`: unconnected, the lane's default is used
/// - `len == 1`: one value for the whole block
/// - `len > 1`: one value per sample
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AcidlineLane {
    pub data: *const f32,
    pub len: u32,
}

impl AcidlineLane {
    /// # Safety
    /// `data` must be null or valid for `len` reads for lifetime `'a`.
    unsafe fn signal<'a>(&self, fallback: f32) -> ControlSignal<'a> {
        if self.data.is_null() || self.len == 0 {
            return ControlSignal::Constant(fallback);
        }
        let buf = unsafe { std::slice::from_raw_parts(self.data, self.len as usize) };
        ControlSignal::from_slice_or(buf, fallback)
    }
}

/// Every input lane for one call. `params` is indexed by parameter id.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AcidlineInputs {
    pub gate: AcidlineLane,
    pub trigger: AcidlineLane,
    pub note: AcidlineLane,
    pub velocity: AcidlineLane,
    pub params: [AcidlineLane; PARAM_COUNT],
}

impl AcidlineInputs {
    /// # Safety
    /// Every lane must satisfy `AcidlineLane::signal`.
    unsafe fn block<'a>(&self) -> BlockInputs<'a> {
        let mut inputs = unsafe {
            BlockInputs::new()
                .gate(self.gate.signal(0.0))
                .trigger(self.trigger.signal(0.0))
                .note(self.note.signal(DEFAULT_NOTE))
                .velocity(self.velocity.signal(DEFAULT_VELOCITY))
        };
        for id in ParamId::ALL {
            let lane = &self.params[id.index()];
            inputs.params[id.index()] = unsafe { lane.signal(param_info(id).default) };
        }
        inputs
    }
}

type SampleRateFn = extern "C" fn(user_data: *mut c_void, sample_rate: f64);
type SetParamFn = extern "C" fn(user_data: *mut c_void, param_id: u32, value: f32);
type RetriggerFn = extern "C" fn(user_data: *mut c_void, note: i32, velocity: i32);
type NoteTimeFn = extern "C" fn(user_data: *mut c_void, note: i32, velocity: i32, time: f64);
type PullSampleFn = extern "C" fn(user_data: *mut c_void) -> f32;

/// Engine implemented by the host, as a table of callbacks.
///
/// Missing callbacks are skipped; a missing `pull_sample` renders silence.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AcidlineEngineCallbacks {
    pub user_data: *mut c_void,
    pub set_sample_rate: Option<SampleRateFn>,
    pub set_param: Option<SetParamFn>,
    pub retrigger: Option<RetriggerFn>,
    pub glide: Option<NoteTimeFn>,
    pub release: Option<NoteTimeFn>,
    pub pull_sample: Option<PullSampleFn>,
}

/// Host callbacks adapted to `SynthEngine`.
struct ForeignEngine {
    callbacks: AcidlineEngineCallbacks,
}

impl SynthEngine for ForeignEngine {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        if let Some(f) = self.callbacks.set_sample_rate {
            f(self.callbacks.user_data, sample_rate);
        }
    }

    fn set_param(&mut self, param: ParamId, value: f32) {
        if let Some(f) = self.callbacks.set_param {
            f(self.callbacks.user_data, param as u32, value);
        }
    }

    fn retrigger(&mut self, note: i32, velocity: i32) {
        if let Some(f) = self.callbacks.retrigger {
            f(self.callbacks.user_data, note, velocity);
        }
    }

    fn glide(&mut self, note: i32, velocity: i32, time: f64) {
        if let Some(f) = self.callbacks.glide {
            f(self.callbacks.user_data, note, velocity, time);
        }
    }

    fn release(&mut self, note: i32, velocity: i32, time: f64) {
        if let Some(f) = self.callbacks.release {
            f(self.callbacks.user_data, note, velocity, time);
        }
    }

    #[inline]
    fn pull_sample(&mut self) -> f32 {
        match self.callbacks.pull_sample {
            Some(f) => f(self.callbacks.user_data),
            None => 0.0,
        }
    }
}

/// Opaque handle to a control unit.
pub struct AcidlineUnit {
    inner: ControlUnit<ForeignEngine>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Metadata
// ═══════════════════════════════════════════════════════════════════════════

/// Get the default configuration values.
#[unsafe(no_mangle)]
pub extern "C" fn acidline_default_config() -> AcidlineConfig {
    AcidlineConfig::default()
}

/// Number of parameter lanes in `AcidlineInputs::params`.
#[unsafe(no_mangle)]
pub extern "C" fn acidline_param_count() -> u32 {
    PARAM_COUNT as u32
}

/// Nominal default of a parameter lane, or NaN for an unknown id.
#[unsafe(no_mangle)]
pub extern "C" fn acidline_param_default(param_id: u32) -> f32 {
    ParamId::from_index(param_id)
        .map(|id| param_info(id).default)
        .unwrap_or(f32::NAN)
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Lifecycle
// ═══════════════════════════════════════════════════════════════════════════

unsafe fn create_unit(
    config: *const AcidlineConfig,
    callbacks: AcidlineEngineCallbacks,
    inputs: *const AcidlineInputs,
) -> Result<AcidlineUnit> {
    let config: UnitConfig = if config.is_null() {
        UnitConfig::default()
    } else {
        unsafe { (*config).into() }
    };
    if inputs.is_null() {
        return Err(UnitError::NullPointer("inputs"));
    }
    let inputs = unsafe { (*inputs).block() };

    let inner = ControlUnit::new(ForeignEngine { callbacks }, config, &inputs)?;
    Ok(AcidlineUnit { inner })
}

/// Create a control unit from the first block of inputs.
///
/// `config` may be NULL for defaults. Returns NULL if the configuration is
/// invalid or `inputs` is NULL; the unit must then not be scheduled.
///
/// # Safety
/// `config` must be NULL or valid. `inputs` must point to valid lanes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn acidline_unit_create(
    config: *const AcidlineConfig,
    callbacks: AcidlineEngineCallbacks,
    inputs: *const AcidlineInputs,
) -> *mut AcidlineUnit {
    match unsafe { create_unit(config, callbacks, inputs) } {
        Ok(unit) => {
            info!("Created unit ({})", unit.inner.mode());
            Box::into_raw(Box::new(unit))
        }
        Err(e) => {
            error!("Error creating unit: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Destroy a control unit.
///
/// # Safety
/// `unit` must be NULL or a pointer returned by `acidline_unit_create`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn acidline_unit_destroy(unit: *mut AcidlineUnit) {
    if !unit.is_null() {
        unsafe { drop(Box::from_raw(unit)) };
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Processing
// ═══════════════════════════════════════════════════════════════════════════

/// Process one block of `frames` samples into `output`.
///
/// Writes silence if `unit` or `inputs` is NULL.
///
/// # Safety
/// `output` must be NULL or valid for `frames` writes; lanes must be valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn acidline_unit_process(
    unit: *mut AcidlineUnit,
    inputs: *const AcidlineInputs,
    output: *mut f32,
    frames: u32,
) {
    let frames = frames as usize;
    if output.is_null() {
        return;
    }
    let out = unsafe { std::slice::from_raw_parts_mut(output, frames) };

    if unit.is_null() || inputs.is_null() {
        out.fill(0.0);
        return;
    }

    let unit = unsafe { &mut *unit };
    let inputs = unsafe { (*inputs).block() };
    unit.inner.process(&inputs, out);
}

/// Note currently held by the unit, or -1 when idle.
///
/// # Safety
/// `unit` must be NULL or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn acidline_unit_current_note(unit: *const AcidlineUnit) -> i32 {
    if unit.is_null() {
        return -1;
    }
    unsafe { (*unit).inner.note_state().note().unwrap_or(-1) }
}

/// Whether the unit evaluates control logic on every sample.
///
/// # Safety
/// `unit` must be NULL or valid.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn acidline_unit_is_sample_accurate(unit: *const AcidlineUnit) -> bool {
    if unit.is_null() {
        return false;
    }
    unsafe { (*unit).inner.mode() == ProcessMode::PerSample }
}
