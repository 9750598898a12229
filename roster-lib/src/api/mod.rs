//! Remote operations grouped by concern

mod directory;
mod membership;

pub use directory::*;
pub use membership::*;
