use anyhow::{anyhow, Result};
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

use crate::vault::ports::{CharsetOptions, PasswordGenerator, Rng};

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 64;
pub const DEFAULT_LENGTH: usize = 16;

pub struct SystemRng;

impl Rng for SystemRng {
    fn fill(&self, bytes: &mut [u8]) -> Result<()> {
        let rng = SystemRandom::new();
        rng.fill(bytes)
            .map_err(|_| anyhow!("failed to obtain system randomness"))
    }
}

pub struct DefaultPasswordGenerator {
    rng: Arc<dyn Rng>,
}

impl DefaultPasswordGenerator {
    pub fn new(rng: Arc<dyn Rng>) -> Self {
        Self { rng }
    }
}

impl Default for DefaultPasswordGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemRng))
    }
}

impl PasswordGenerator for DefaultPasswordGenerator {
    fn generate(&self, length: usize, options: &CharsetOptions) -> Result<String> {
        let pool = build_pool(options);
        let mut out = String::with_capacity(length);
        for _ in 0..length {
            let idx = uniform_index(&*self.rng, pool.len())?;
            out.push(pool[idx] as char);
        }
        Ok(out)
    }
}

/// Caller-side length policy: missing or zero means the default, anything
/// else is clamped into `[MIN_LENGTH, MAX_LENGTH]`.
pub fn clamp_length(requested: Option<u32>) -> usize {
    let n = match requested {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_LENGTH,
    };
    n.clamp(MIN_LENGTH, MAX_LENGTH)
}

// ===== Character pool =====

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Union of the selected classes; mixed-case letters and digits when none is selected.
pub fn build_pool(options: &CharsetOptions) -> Vec<u8> {
    if options.is_empty() {
        return [UPPER, LOWER, DIGITS].concat();
    }
    let mut pool: Vec<u8> = Vec::new();
    if options.include_uppercase { pool.extend_from_slice(UPPER); }
    if options.include_lowercase { pool.extend_from_slice(LOWER); }
    if options.include_digits { pool.extend_from_slice(DIGITS); }
    if options.include_symbols { pool.extend_from_slice(SYMBOLS); }
    pool
}

fn uniform_index(rng: &dyn Rng, len: usize) -> Result<usize> {
    if len == 0 { return Err(anyhow!("empty pool")); }
    // Rejection sampling on u32 space
    let n = len as u32;
    let zone = (u32::MAX / n) * n;
    loop {
        let mut b = [0u8; 4];
        rng.fill(&mut b)?;
        let x = u32::from_le_bytes(b);
        if x < zone {
            return Ok((x % n) as usize);
        }
    }
}

// ===== Basic strength estimator (UI hint) =====
pub fn estimate_bits(length: usize, options: &CharsetOptions) -> f64 {
    let pool = build_pool(options).len();
    (pool as f64).log2() * (length as f64)
}

pub fn strength_label(bits: f64) -> &'static str {
    if bits < 28.0 { "very weak" } else if bits < 36.0 { "weak" } else if bits < 60.0 { "fair" } else if bits < 128.0 { "strong" } else { "excellent" }
}
