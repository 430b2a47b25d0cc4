//! Code generators

use rand::{rngs::OsRng, Rng};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use og_shared::config::otp::{MAX_DIGIT_WIDTH, MIN_DIGIT_WIDTH};

use super::traits::CodeGenerator;

/// Generates codes from the operating system CSPRNG
///
/// The value is drawn uniformly from `[0, 10^width)` and rendered with leading
/// zeros, so every code of the configured width is equally likely. Widths
/// outside 4..=9 are clamped into that range.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self, width: usize) -> String {
        let width = width.clamp(MIN_DIGIT_WIDTH, MAX_DIGIT_WIDTH);
        let upper = 10u64.pow(width as u32);
        let value = OsRng.gen_range(0..upper);
        format!("{:0width$}", value, width = width)
    }
}

/// Hands out a fixed sequence of codes, repeating the last one
///
/// Used by tests to know the code without reading the delivered message.
#[derive(Debug)]
pub struct FixedCodeGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
}

impl FixedCodeGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self, width: usize) -> String {
        let next = self
            .codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        match next {
            Some(code) => {
                *last = Some(code.clone());
                code
            }
            None => last.clone().unwrap_or_else(|| "0".repeat(width)),
        }
    }
}
