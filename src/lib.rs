//! Homeostat - Artificial Organism Survival Core

pub mod core;
pub mod ethics;
pub mod goals;
pub mod identity;
pub mod metabolism;
pub mod perception;
pub mod prediction;
pub mod simulation;
pub mod world;
