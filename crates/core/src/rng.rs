//! RNG module - seeded tile color generation
//!
//! Every new tile gets an independently drawn color from the configured
//! palette. A small LCG keeps games reproducible from a seed.

use crate::types::{Tile, TileColor};

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
    /// Scales from the high bits: the low bits of a power-of-two LCG cycle
    /// with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw a uniformly random color from a non-empty palette
    pub fn next_color(&mut self, palette: &[TileColor]) -> TileColor {
        debug_assert!(!palette.is_empty());
        let idx = self.next_range(palette.len() as u32) as usize;
        palette[idx]
    }

    /// Draw a settled tile with a random color
    pub fn next_tile(&mut self, palette: &[TileColor]) -> Tile {
        Tile::new(self.next_color(palette))
    }

    /// Current state, usable as a seed to replay from this point
    pub fn seed(&self) -> u32 {
        self.state
    }
}
