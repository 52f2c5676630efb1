//! Per-point, per-hour charging draws from a seeded random source.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::types::SimulationParameters;

/// Converts a percentage multiplier into a per-hour, per-point probability.
///
/// Values above 100 % saturate to 1.0 ("always charging"), negative values
/// and NaN collapse to 0.0.
///
/// # Examples
///
/// ```
/// use ev_demand_sim::sim::sampler::arrival_probability;
///
/// assert_eq!(arrival_probability(50.0), 0.5);
/// assert_eq!(arrival_probability(200.0), 1.0);
/// assert_eq!(arrival_probability(f64::NAN), 0.0);
/// ```
pub fn arrival_probability(multiplier_pct: f64) -> f64 {
    let p = multiplier_pct / 100.0;
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Bernoulli-gated power draws for the charge points of one site.
///
/// Each call to [`draw_kw`](Self::draw_kw) consumes one uniform value for
/// the arrival coin-flip and, only when the point is active, a second
/// uniform value for the power level `floor(u * max_power_kw)`. The draw
/// order is fixed, so two samplers fed identical random sources produce
/// identical matrices.
///
/// Generic over the random source so tests can inject a deterministic one.
#[derive(Debug, Clone)]
pub struct ChargePointSampler<R> {
    /// Effective per-hour activation probability in `[0, 1]`.
    pub probability: f64,

    /// Exclusive upper bound of a single draw (kW).
    pub max_power_kw: f64,

    rng: R,
}

impl ChargePointSampler<StdRng> {
    /// Creates a sampler backed by a `StdRng` seeded from `seed`.
    pub fn seeded(params: &SimulationParameters, seed: u64) -> Self {
        Self::new(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ChargePointSampler<R> {
    /// Creates a sampler for the given site parameters and random source.
    ///
    /// # Arguments
    ///
    /// * `params` - Site parameters (probability multiplier and power bound are used)
    /// * `rng` - Random source; pass `&mut rng` to keep ownership at the call site
    pub fn new(params: &SimulationParameters, rng: R) -> Self {
        Self {
            probability: arrival_probability(params.arrival_probability_multiplier),
            max_power_kw: params.charging_power_per_point_kw,
            rng,
        }
    }

    /// Draws one point's power for one hour in whole kW.
    ///
    /// Returns 0 when the point is idle. An active point may also draw 0 kW
    /// (always the case when `max_power_kw < 1`); that is not an event.
    pub fn draw_kw(&mut self) -> u64 {
        let arrival: f64 = self.rng.random();
        if arrival >= self.probability {
            return 0;
        }

        let level: f64 = self.rng.random();
        // Float-to-int `as` saturates: NaN and negatives become 0.
        (level * self.max_power_kw).floor() as u64
    }

    /// Draws one hour of power values for `points` charge points, in index order.
    pub fn sample_hour(&mut self, points: usize) -> Vec<u64> {
        (0..points).map(|_| self.draw_kw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    /// Random source that returns the same word forever.
    struct ConstRng(u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            (self.0 >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 8];
            }
        }
    }

    fn params(multiplier: f64, power_kw: f64) -> SimulationParameters {
        SimulationParameters::new(4, multiplier, power_kw, 1)
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(arrival_probability(0.0), 0.0);
        assert_eq!(arrival_probability(20.0), 0.2);
        assert_eq!(arrival_probability(100.0), 1.0);
        assert_eq!(arrival_probability(150.0), 1.0);
        assert_eq!(arrival_probability(-10.0), 0.0);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let p = params(80.0, 22.0);
        let mut a = ChargePointSampler::seeded(&p, 42);
        let mut b = ChargePointSampler::seeded(&p, 42);

        for _ in 0..48 {
            assert_eq!(a.sample_hour(4), b.sample_hour(4));
        }
    }

    #[test]
    fn zero_probability_never_draws() {
        let mut sampler = ChargePointSampler::seeded(&params(0.0, 11.0), 7);
        for _ in 0..100 {
            assert_eq!(sampler.sample_hour(4), vec![0; 4]);
        }
    }

    #[test]
    fn draws_stay_below_power_bound() {
        let mut sampler = ChargePointSampler::seeded(&params(100.0, 11.0), 3);
        for _ in 0..500 {
            assert!(sampler.draw_kw() < 11);
        }
    }

    #[test]
    fn fractional_power_bound_floors() {
        let mut sampler = ChargePointSampler::seeded(&params(100.0, 2.5), 11);
        let mut seen_two = false;
        for _ in 0..1000 {
            let kw = sampler.draw_kw();
            assert!(kw <= 2);
            seen_two |= kw == 2;
        }
        assert!(seen_two, "floor(u * 2.5) should reach 2");
    }

    #[test]
    fn sub_kilowatt_bound_only_draws_zero() {
        let mut sampler = ChargePointSampler::seeded(&params(200.0, 0.9), 5);
        for _ in 0..100 {
            assert_eq!(sampler.draw_kw(), 0);
        }
    }

    #[test]
    fn saturated_probability_with_high_uniforms_draws_every_point() {
        let mut sampler = ChargePointSampler::new(&params(200.0, 11.0), ConstRng(u64::MAX));
        assert_eq!(sampler.sample_hour(3), vec![10, 10, 10]);
    }

    #[test]
    fn uniform_above_probability_is_idle() {
        let mut sampler = ChargePointSampler::new(&params(50.0, 11.0), ConstRng(u64::MAX));
        assert_eq!(sampler.sample_hour(2), vec![0, 0]);
    }

    #[test]
    fn borrowed_rng_is_accepted() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sampler = ChargePointSampler::new(&params(100.0, 11.0), &mut rng);
        assert_eq!(sampler.sample_hour(5).len(), 5);
    }
}
