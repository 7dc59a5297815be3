//! Vital state and the engine that governs it

pub mod engine;
pub mod vitals;

pub use engine::MetabolicEngine;
pub use vitals::{FailReason, Vitals, VitalsSnapshot};
