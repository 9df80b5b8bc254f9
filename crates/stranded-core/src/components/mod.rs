//! Pure data types for the simulation.
//!
//! Components carry no behavior beyond small value-type helpers.
//! The logic that mutates them lives in systems and in the engine.

mod bots;
mod common;
mod economy;

pub use bots::*;
pub use common::*;
pub use economy::*;
