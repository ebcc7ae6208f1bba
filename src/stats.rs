//! Trait statistics for generational analysis.
//!
//! Plotting collaborators consume these snapshots read-only; the crate only
//! records and exports them.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};

/// Trait statistics captured at the end of a generation (or mid-generation
/// for progress logging).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TraitSummary {
    /// Generation index
    pub generation: u32,
    /// Tick within the generation at capture time
    pub tick: u64,
    /// Agents remaining in the population
    pub population: usize,
    /// Agents that still have energy
    pub active: usize,
    pub size_mean: f64,
    pub speed_mean: f64,
    pub vision_mean: f64,
    pub strength_mean: f64,
    pub energy_mean: f64,
    /// Food items left uneaten
    pub food_remaining: usize,
    /// Food items eaten by the surviving population
    pub food_consumed: u32,
}

impl TraitSummary {
    /// Capture a snapshot of the environment.
    pub fn capture(env: &Environment, generation: u32) -> Self {
        let mut summary = Self {
            generation,
            tick: env.time,
            population: env.population.len(),
            active: env.living_count(),
            food_remaining: env.food.len(),
            food_consumed: env.total_food_consumed(),
            ..Self::default()
        };

        if summary.population > 0 {
            let inv = 1.0 / summary.population as f64;
            let sum_of = |f: fn(&crate::agent::Agent) -> f64| -> f64 {
                env.population.iter().map(f).sum::<f64>() * inv
            };
            summary.size_mean = sum_of(|a| a.traits.size as f64);
            summary.speed_mean = sum_of(|a| a.traits.speed as f64);
            summary.vision_mean = sum_of(|a| a.traits.vision as f64);
            summary.strength_mean = sum_of(|a| a.traits.strength as f64);
            summary.energy_mean = sum_of(|a| a.energy as f64);
        }

        summary
    }

    /// Format the snapshot as a one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:3} | T:{:5} | Pop:{:4} ({} active) | Size:{:.2} | Speed:{:.2} | Vision:{:.2} | Strength:{:.2} | Eaten:{} | Food left:{}",
            self.generation,
            self.tick,
            self.population,
            self.active,
            self.size_mean,
            self.speed_mean,
            self.vision_mean,
            self.strength_mean,
            self.food_consumed,
            self.food_remaining,
        )
    }
}

/// Per-generation history of trait summaries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TraitHistory {
    pub snapshots: Vec<TraitSummary>,
}

impl TraitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot.
    pub fn record(&mut self, summary: TraitSummary) {
        self.snapshots.push(summary);
    }

    /// Most recent snapshot, if any.
    pub fn latest(&self) -> Option<&TraitSummary> {
        self.snapshots.last()
    }

    /// Population over generations.
    pub fn population_series(&self) -> Vec<(u32, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.population))
            .collect()
    }

    /// Mean size over generations.
    pub fn size_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.size_mean))
            .collect()
    }

    /// Mean speed over generations.
    pub fn speed_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.speed_mean))
            .collect()
    }

    /// Mean vision over generations.
    pub fn vision_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.vision_mean))
            .collect()
    }

    /// Mean strength over generations.
    pub fn strength_series(&self) -> Vec<(u32, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.strength_mean))
            .collect()
    }

    /// Save history to a JSON file.
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file.
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
