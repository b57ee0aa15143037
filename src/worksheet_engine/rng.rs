//! Seeded, reproducible random stream for worksheet generation.
//!
//! Worksheets are reproduced from their ID alone, so the generator must give
//! the exact same sequence for the same seed on every platform. `Mulberry32`
//! is a 32-bit state generator with xorshift-style mixing; it is fast and
//! non-cryptographic. It implements [`rand::RngCore`] so the rest of the
//! crate can pass it around as `&mut dyn RngCore` like any other RNG.

use rand::RngCore;

/// Mulberry32 generator. One instance per generation run; never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Build a generator from a signed 32-bit seed.
    pub fn new(seed: i32) -> Self {
        Mulberry32 { state: seed as u32 }
    }

    /// Build a generator seeded from an arbitrary string (a worksheet ID).
    pub fn from_seed_str(s: &str) -> Self {
        Self::new(string_to_seed(s))
    }

    /// Advance the state and return the raw 32-bit output.
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        unit_float(self)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.step() as u64;
        let lo = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Float in `[0, 1)` from any RNG: one `next_u32` divided by 2^32.
///
/// Every helper that needs a uniform float goes through here so one draw
/// always consumes exactly one 32-bit output, whatever the RNG.
pub fn unit_float<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    rng.next_u32() as f64 / 4_294_967_296.0
}

/// Polynomial rolling hash (`h = h * 31 + unit`) over the UTF-16 code units of
/// `s`, wrapped to a signed 32-bit integer.
pub fn string_to_seed(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}
