//! RNG module - injectable digit sources
//!
//! Every random digit the game uses (initial fill and gravity refill) comes
//! from a [`DigitSource`]. The default source is a small seeded LCG so that a
//! given seed always reproduces the same game; tests can substitute
//! [`DigitSequence`] to script exact refill values.

use crate::types::{Digit, DIGIT_COUNT};

/// Source of uniformly distributed digits in `0..=9`.
pub trait DigitSource {
    fn next_digit(&mut self) -> Digit;
}

impl<T: DigitSource + ?Sized> DigitSource for &mut T {
    fn next_digit(&mut self) -> Digit {
        (**self).next_digit()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state (reseeding with it resumes the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl DigitSource for SimpleRng {
    fn next_digit(&mut self) -> Digit {
        self.next_range(DIGIT_COUNT as u32) as Digit
    }
}

/// Replays a fixed digit script, cycling when exhausted.
///
/// Intended for tests that need to know exactly which digits a refill writes.
#[derive(Debug, Clone)]
pub struct DigitSequence {
    digits: Vec<Digit>,
    pos: usize,
}

impl DigitSequence {
    /// # Panics
    ///
    /// Panics if `digits` is empty or contains a value above 9.
    pub fn new(digits: impl Into<Vec<Digit>>) -> Self {
        let digits = digits.into();
        assert!(!digits.is_empty(), "digit sequence must not be empty");
        assert!(
            digits.iter().all(|&d| (d as usize) < DIGIT_COUNT),
            "digit sequence values must be in 0..=9"
        );
        Self { digits, pos: 0 }
    }

    /// A source that always yields `digit`.
    pub fn repeat(digit: Digit) -> Self {
        Self::new(vec![digit])
    }

    /// Number of digits drawn so far.
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl DigitSource for DigitSequence {
    fn next_digit(&mut self) -> Digit {
        let d = self.digits[self.pos % self.digits.len()];
        self.pos += 1;
        d
    }
}
