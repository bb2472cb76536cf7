/// Small deterministic PRNG (SplitMix64).
///
/// Owned by whoever starts reveal passes; seed it explicitly for reproducible
/// stagger and activation draws.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the system clock. Used by hosts that want a different
    /// choreography on every launch.
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos)
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `[min, max]`. Returns `min` when the range is empty.
    pub fn range_i32(&mut self, min_inclusive: i32, max_inclusive: i32) -> i32 {
        if max_inclusive <= min_inclusive {
            return min_inclusive;
        }
        let span = (i64::from(max_inclusive) - i64::from(min_inclusive) + 1) as u64;
        let off = self.next_u64() % span;
        (i64::from(min_inclusive) + off as i64) as i32
    }

    /// Bernoulli trial that succeeds with `percent` out of 100.
    pub fn roll_percent(&mut self, percent: u32) -> bool {
        (self.next_u64() % 100) < u64::from(percent.min(100))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
