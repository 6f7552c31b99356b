//! Entropy-seeded dice for live sessions.
use encounter_core::RngOracle;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// [`RngOracle`] backed by `rand`'s standard generator.
#[derive(Clone, Debug)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    /// Seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Fixed seed, for reproducing a session.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngOracle for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.inner.gen_range(1..=sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_on_the_die() {
        let mut rng = EntropyRng::seeded(11);
        for _ in 0..500 {
            let roll = rng.roll_d20();
            assert!((1..=20).contains(&roll));
        }
        assert_eq!(rng.roll_die(0), 0);
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = EntropyRng::seeded(3);
        let mut b = EntropyRng::seeded(3);
        let left: Vec<u32> = (0..16).map(|_| a.roll_d20()).collect();
        let right: Vec<u32> = (0..16).map(|_| b.roll_d20()).collect();
        assert_eq!(left, right);
    }
}
