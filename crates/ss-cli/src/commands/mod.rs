pub mod catalog;
pub mod play;
pub mod simulate;
pub mod skill;
pub mod view;

use std::path::Path;

use ss_simulation::{SimConfig, Simulation};

/// Load the maps in `dir` and start a simulation with the default systems.
fn start(dir: &Path, seed: u64) -> Result<Simulation, String> {
    let config = SimConfig::default().with_seed(seed);
    Simulation::load(dir, config)
        .map(Simulation::with_default_systems)
        .map_err(|e| e.to_string())
}
