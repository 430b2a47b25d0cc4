//! Domain entities representing core business objects.

pub mod challenge;

pub use challenge::{Challenge, Channel};
