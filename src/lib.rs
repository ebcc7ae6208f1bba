//! # VELDT
//!
//! Agent-based natural-selection simulator.
//!
//! A population of agents with heritable traits (size, speed, vision,
//! strength) competes for food inside a bounded 2-D arena while predators
//! roam it. Traits drift across generations through mutation-on-reproduction
//! under starvation and predation pressure.
//!
//! ## Features
//!
//! - **Deterministic**: single-threaded, one seeded RNG; a fixed seed
//!   replays a run exactly
//! - **Configurable**: YAML configuration files for every tunable
//! - **Pluggable predators**: the environment consumes a small capability
//!   trait, so hunting AIs can be swapped in from outside
//! - **Analyzable**: per-generation trait statistics exported as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use veldt::{Config, Simulation};
//!
//! let mut config = Config::default();
//! config.simulation.generations = 2;
//! config.simulation.max_ticks = 200;
//! config.agents.initial_energy = 100;
//!
//! let mut sim = Simulation::new_with_seed(config, 42);
//! sim.run();
//!
//! println!("generations recorded: {}", sim.history.snapshots.len());
//! ```
//!
//! ## Driving the engine directly
//!
//! ```rust
//! use veldt::{Config, Environment, Simulation};
//!
//! let config = Config::default();
//! let mut sim = Simulation::new_with_seed(config.clone(), 7);
//! let population = sim.seed_population();
//! let food = sim.seed_food();
//!
//! let mut env = Environment::new_with_seed(population, Vec::new(), food, config, 7);
//! env.update_environment(); // one tick
//! assert_eq!(env.time, 1);
//! ```

pub mod adversary;
pub mod agent;
pub mod config;
pub mod environment;
pub mod food;
pub mod point;
pub mod simulation;
pub mod stats;

// Re-export main types
pub use agent::{Agent, Traits};
pub use config::Config;
pub use environment::Environment;
pub use food::Food;
pub use point::{Bounds, Point};
pub use simulation::Simulation;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let mut config = Config::default();
        config.simulation.generations = 2;
        config.simulation.max_ticks = 100;
        config.agents.initial_energy = 50;

        let mut sim = Simulation::new_with_seed(config, 1);
        sim.run();

        assert!(!sim.history.snapshots.is_empty());
    }
}
