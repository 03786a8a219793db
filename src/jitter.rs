//! Randomized variation of angles and segment lengths.

use rand::Rng;

/// A source of uniform samples in `[-1, 1]`.
///
/// Implemented for every [`rand::Rng`], so a seeded `SmallRng` gives
/// reproducible renders and `thread_rng()` gives the usual non-deterministic ones.
pub trait JitterSource {
    fn uniform(&mut self) -> f64;
}

impl<R: Rng> JitterSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen_range(-1.0..=1.0)
    }
}

/// Returns `base * (1 + fraction * u)` for a fresh sample `u`.
///
/// A zero `fraction` returns `base` untouched and consumes no sample.
pub fn jitter<J: JitterSource + ?Sized>(source: &mut J, base: f64, fraction: f64) -> f64 {
    if fraction == 0.0 {
        return base;
    }
    base * (1.0 + fraction * source.uniform())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Panics if sampled; proves zero-fraction jitter never touches the source.
    struct Untouchable;

    impl JitterSource for Untouchable {
        fn uniform(&mut self) -> f64 {
            panic!("zero jitter must not sample");
        }
    }

    #[test]
    fn test_zero_fraction_is_exact() {
        let mut source = Untouchable;
        let base = 0.1 + 0.2;
        assert_eq!(jitter(&mut source, base, 0.0).to_bits(), base.to_bits());
    }

    #[test]
    fn test_jitter_stays_within_fraction() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = jitter(&mut rng, 10.0, 0.25);
            assert!((7.5..=12.5).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(jitter(&mut a, 60.0, 0.1), jitter(&mut b, 60.0, 0.1));
        }
    }
}
