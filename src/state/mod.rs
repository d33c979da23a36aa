// src/state/mod.rs
//
// Declarative description of a control unit.
//
// These structures describe *how* a unit is wired (lane layout, sample
// rate, parameter metadata). They are read at construction time and by
// front ends; the processing path never touches them.

mod config;
mod layout;
mod param_info;

pub use config::*;
pub use layout::*;
pub use param_info::*;
