//! Typed models

mod group;
mod member;
mod role;

pub use group::*;
pub use member::*;
pub use role::*;
