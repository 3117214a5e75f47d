use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random source seeded from the operating system, for production conversions.
pub fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Random source with a fixed seed, for reproducible conversions.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive an independent child source from `parent`, consuming one `u64` of it.
pub(crate) fn fork_rng(parent: &mut dyn RngCore) -> StdRng {
    StdRng::seed_from_u64(parent.next_u64())
}

/// Stub random source that yields the same word forever.
///
/// Every render function draws its randomness through float sampling, so any constant is safe
/// to use here: a stubbed source never stalls a rejection loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstantRng(pub u64);

impl RngCore for ConstantRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let bytes = self.0.to_le_bytes();
        for (i, b) in dest.iter_mut().enumerate() {
            *b = bytes[i % bytes.len()];
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Uniform in `[0, 1)`.
pub(crate) fn unit(rng: &mut dyn RngCore) -> f64 {
    rng.r#gen::<f64>()
}

/// Uniform between `lo` and `hi`.
pub(crate) fn between(rng: &mut dyn RngCore, lo: f64, hi: f64) -> f64 {
    lo + unit(rng) * (hi - lo)
}

/// `true` with probability `p`.
pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    unit(rng) < p
}

/// Uniform index in `0..n`. `n` must be non-zero.
pub(crate) fn pick(rng: &mut dyn RngCore, n: usize) -> usize {
    debug_assert!(n > 0);
    ((unit(rng) * n as f64) as usize).min(n.saturating_sub(1))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
