// Helpers shared by unit tests across modules.

/// Xorshift64 generator for deterministic generated test inputs.
pub(crate) struct XorShift64(u64);

impl XorShift64 {
    /// `seed` must be nonzero.
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}
