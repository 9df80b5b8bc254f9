//! Systems - logic that operates on the grid, the bot arena, and the
//! controllers.

mod actions;
mod maturation;

pub use actions::*;
pub use maturation::*;
