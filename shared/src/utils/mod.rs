//! Common utility functions

pub mod recipient;

// Re-export commonly used utilities
pub use recipient::*;
