//! Secure random byte source.
//!
//! Randomness is an explicit capability handed to the façade at
//! construction time rather than a process-global hook, so tests can
//! substitute a deterministic source without shared mutable state.

use rand::rngs::OsRng;
use rand::RngCore;

/// A source of cryptographically secure random bytes.
pub trait RandomSource {
    /// Fill `buf` with fresh random bytes.
    fn fill(&mut self, buf: &mut [u8]);
}

/// The operating system's CSPRNG, via `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}
