//! Domain layer containing the challenge entity.

pub mod entities;

pub use entities::{Challenge, Channel};
