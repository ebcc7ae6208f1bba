//! Configuration for the simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::agent::Traits;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub agents: AgentConfig,
    pub mutation: MutationConfig,
    #[serde(default)]
    pub adversaries: AdversaryConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Arena configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Arena width
    pub width: f64,
    /// Arena height
    pub height: f64,
    /// Collision radius of every food item
    pub food_radius: f64,
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Energy a fresh agent starts with
    pub initial_energy: u32,
    /// Fixed body radius used for collision detection
    pub entity_radius: f64,
    /// Vision radius = vision trait * this multiplier
    pub vision_multiplier: f64,
    /// Traits of the founding population
    pub starting_traits: Traits,
}

/// Trait mutation tunables, shared by the whole population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that a trait mutates on reproduction
    pub probability: f64,
    /// Maximum magnitude of a single mutation step
    pub amount: u32,
}

/// Predator configuration (radius and pursuit speed of the built-in pursuer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdversaryConfig {
    /// Collision radius of a predator
    pub radius: f64,
    /// Distance a predator covers per tick
    pub speed: f64,
}

/// Generation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Agents in the founding population
    pub initial_agents: usize,
    /// Predators released each generation
    pub initial_adversaries: usize,
    /// Food items scattered at the start of each generation
    pub food_per_generation: usize,
    /// Ticks per generation
    pub max_ticks: u64,
    /// Number of generations to run
    pub generations: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Ticks between intra-generation stats logging
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            agents: AgentConfig::default(),
            mutation: MutationConfig::default(),
            adversaries: AdversaryConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            food_radius: 5.0,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            initial_energy: 1000,
            entity_radius: 5.0,
            vision_multiplier: 4.0,
            starting_traits: Traits {
                size: 2,
                speed: 3,
                vision: 5,
                strength: 3,
            },
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            probability: 0.1,
            amount: 1,
        }
    }
}

impl Default for AdversaryConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            speed: 2.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_agents: 5,
            initial_adversaries: 0,
            food_per_generation: 30,
            max_ticks: 5000,
            generations: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 500,
            log_level: "info".to_string(),
        }
    }
}

impl MutationConfig {
    /// Mutate a single trait value. With probability `probability`, adds a
    /// uniformly chosen non-zero integer offset in `[-amount, amount]`,
    /// clamped at 0. Otherwise returns the value unchanged.
    pub fn mutate_trait(&self, value: u32, rng: &mut impl Rng) -> u32 {
        if self.amount == 0 || rng.gen::<f64>() >= self.probability {
            return value;
        }

        let span = self.amount as i64;
        // Uniform over [-span, span-1]; shifting the non-negative half up by
        // one yields a uniform non-zero offset in [-span, span].
        let mut offset = rng.gen_range(-span..span);
        if offset >= 0 {
            offset += 1;
        }

        (value as i64 + offset).max(0) as u32
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            return Err("arena dimensions must be positive".to_string());
        }
        if self.world.food_radius < 0.0 {
            return Err("food_radius must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.mutation.probability) {
            return Err("mutation probability must be between 0 and 1".to_string());
        }
        if self.agents.entity_radius < 0.0 || self.agents.vision_multiplier < 0.0 {
            return Err("agent radii and multipliers must be non-negative".to_string());
        }
        if self.simulation.initial_agents == 0 {
            return Err("initial_agents must be > 0".to_string());
        }
        if self.simulation.max_ticks == 0 {
            return Err("max_ticks must be > 0".to_string());
        }
        if self.simulation.generations == 0 {
            return Err("generations must be > 0".to_string());
        }
        Ok(())
    }
}
