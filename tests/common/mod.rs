//! Shared test fixtures for integration tests.

use rand::RngCore;

use ev_demand_sim::sim::engine::Engine;
use ev_demand_sim::sim::types::{SimulationParameters, SimulationResult};

/// Default site (4 points, 100%, 11 kW) over the given horizon.
pub fn default_params(days: usize) -> SimulationParameters {
    SimulationParameters::new(4, 100.0, 11.0, days)
}

/// Parameter sets spanning the accepted input ranges.
pub fn parameter_grid() -> Vec<SimulationParameters> {
    vec![
        SimulationParameters::new(1, 20.0, 3.7, 3),
        SimulationParameters::new(4, 100.0, 11.0, 30),
        SimulationParameters::new(12, 150.0, 22.0, 45),
        SimulationParameters::new(40, 200.0, 50.0, 7),
    ]
}

/// Runs a seeded simulation, panicking on engine errors.
pub fn run_seeded(params: &SimulationParameters, seed: u64) -> SimulationResult {
    Engine::seeded(params, seed)
        .run()
        .expect("seeded run should succeed")
}

/// RNG that returns the same word on every draw.
///
/// `ConstRng(u64::MAX)` yields uniforms just below 1.0: every point is active
/// whenever the probability saturates, and draws `P - 1` kW.
pub struct ConstRng(pub u64);

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
