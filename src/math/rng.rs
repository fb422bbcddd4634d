use std::time::{SystemTime, UNIX_EPOCH};

/// Small xorshift generator for scattering particles. Statistical
/// quality only has to be good enough for visuals.
pub struct Rng {
    state: u32,
    bound: f32,
}

impl Rng {
    pub fn new(bound: f32) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0x2545_F491);

        Self::from_seed(seed, bound)
    }

    pub fn from_seed(seed: u32, bound: f32) -> Self {
        Self {
            // xorshift must never sit at zero
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
            bound,
        }
    }

    /// Next value in [0, bound).
    pub fn advance(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;

        // keep 24 bits so the fraction is exact in f32
        (self.state >> 8) as f32 / (1u32 << 24) as f32 * self.bound
    }
}
