//! Deterministic random stream.
//!
//! SplitMix64-style mixing; every stochastic decision in the kernel
//! draws from one instance, so a run replays bit-identically from its
//! seed.

#[derive(Debug, Clone)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }

    /// Uniform draw in `[0, bound)`. A zero bound yields zero; the
    /// underlying draw is still consumed so the stream position does
    /// not depend on the bound.
    pub fn roll(&mut self, bound: u64) -> u64 {
        let value = self.next_u64();
        if bound == 0 {
            0
        } else {
            value % bound
        }
    }

    /// Uniform draw in `[0, 100)`.
    pub fn percent(&mut self) -> u64 {
        self.roll(100)
    }

    /// Bernoulli trial succeeding `percent` times out of 100.
    pub fn chance(&mut self, percent: u64) -> bool {
        self.percent() < percent
    }
}
