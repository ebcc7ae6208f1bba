//! Generation orchestration: seeds populations, runs tick loops, selects
//! survivors and breeds the next generation.

use crate::adversary::{Adversary, Pursuer};
use crate::agent::Agent;
use crate::config::Config;
use crate::environment::Environment;
use crate::food::Food;
use crate::point::{Bounds, Point};
use crate::stats::{TraitHistory, TraitSummary};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Multi-generation driver around the per-tick [`Environment`] engine.
///
/// Selection policy: an agent survives a generation if it ate at least one
/// food item and escaped predation. Every survivor leaves one offspring;
/// survivors that ate two or more leave a second.
pub struct Simulation {
    pub config: Config,
    pub history: TraitHistory,
    /// Index of the generation currently running (or about to run)
    pub generation: u32,

    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a simulation with a random seed.
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a simulation with a specific seed for reproducibility.
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        Self {
            config,
            history: TraitHistory::new(),
            generation: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.config.world.width, self.config.world.height)
    }

    fn random_point(&mut self) -> Point {
        let x = self.rng.gen_range(0.0..=self.config.world.width);
        let y = self.rng.gen_range(0.0..=self.config.world.height);
        Point::new(x, y)
    }

    /// Found a fresh population with the configured starting traits, at
    /// uniformly random positions.
    pub fn seed_population(&mut self) -> Vec<Agent> {
        let bounds = self.bounds();
        (0..self.config.simulation.initial_agents)
            .map(|_| {
                let position = self.random_point();
                Agent::new(
                    position,
                    self.config.agents.starting_traits,
                    bounds,
                    &self.config.agents,
                )
            })
            .collect()
    }

    /// Scatter this generation's food across the arena.
    pub fn seed_food(&mut self) -> Vec<Food> {
        (0..self.config.simulation.food_per_generation)
            .map(|_| Food::new(self.random_point(), self.config.world.food_radius))
            .collect()
    }

    /// Release this generation's predators.
    pub fn seed_adversaries(&mut self) -> Vec<Box<dyn Adversary>> {
        let bounds = self.bounds();
        (0..self.config.simulation.initial_adversaries)
            .map(|_| {
                Box::new(Pursuer::new(
                    self.random_point(),
                    self.config.adversaries.radius,
                    self.config.adversaries.speed,
                    bounds,
                )) as Box<dyn Adversary>
            })
            .collect()
    }

    /// Run one generation to completion and return the surviving agents.
    /// Stops early on extinction, or once nothing in the arena can change.
    pub fn run_generation(&mut self, population: Vec<Agent>) -> Vec<Agent> {
        let env_seed = self.rng.gen();
        let adversaries = self.seed_adversaries();
        let food = self.seed_food();
        let mut env =
            Environment::new_with_seed(population, adversaries, food, self.config.clone(), env_seed);

        let stats_interval = self.config.logging.stats_interval.max(1);
        for _ in 0..self.config.simulation.max_ticks {
            env.update_environment();

            if env.time % stats_interval == 0 {
                debug!("{}", TraitSummary::capture(&env, self.generation).summary());
            }
            if env.is_extinct() {
                info!(
                    "generation {}: population extinct at tick {}",
                    self.generation, env.time
                );
                break;
            }
            // A world with no energy left and no hunters is static.
            if env.living_count() == 0 && env.adversaries.is_empty() {
                break;
            }
        }

        self.history.record(TraitSummary::capture(&env, self.generation));
        env.population
    }

    /// Breed the next generation from this generation's survivors.
    pub fn next_generation(&mut self, survivors: &[Agent]) -> Vec<Agent> {
        let mut next = Vec::new();

        for parent in survivors {
            if parent.food_consumed == 0 {
                continue;
            }
            next.push(parent.reproduce(&self.config.agents, &self.config.mutation, &mut self.rng));
            if parent.food_consumed >= 2 {
                next.push(parent.reproduce(
                    &self.config.agents,
                    &self.config.mutation,
                    &mut self.rng,
                ));
            }
        }

        next
    }

    /// Run the configured number of generations.
    pub fn run(&mut self) {
        self.run_with_callback(|_, _| {});
    }

    /// Run the configured number of generations, invoking the callback with
    /// each generation's closing summary.
    pub fn run_with_callback<F>(&mut self, mut callback: F)
    where
        F: FnMut(&Simulation, &TraitSummary),
    {
        let mut population = self.seed_population();

        for generation in 0..self.config.simulation.generations {
            self.generation = generation;
            let survivors = self.run_generation(population);
            population = self.next_generation(&survivors);

            if let Some(summary) = self.history.latest() {
                let summary = summary.clone();
                callback(self, &summary);
            }

            if population.is_empty() {
                info!("no survivors bred after generation {}", generation);
                break;
            }
        }
    }

    /// Seed for reproducibility.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.simulation.initial_agents = 10;
        config.simulation.food_per_generation = 40;
        config.simulation.max_ticks = 300;
        config.simulation.generations = 3;
        config.agents.initial_energy = 200;
        config
    }

    #[test]
    fn test_seed_population_respects_config() {
        let mut sim = Simulation::new_with_seed(test_config(), 42);
        let population = sim.seed_population();

        assert_eq!(population.len(), 10);
        let bounds = Bounds::new(500.0, 500.0);
        for agent in &population {
            assert!(bounds.contains(agent.position));
            assert_eq!(agent.traits, sim.config.agents.starting_traits);
            assert_eq!(agent.energy, 200);
        }
    }

    #[test]
    fn test_seed_food_respects_config() {
        let mut sim = Simulation::new_with_seed(test_config(), 42);
        let food = sim.seed_food();

        assert_eq!(food.len(), 40);
        assert!(food.iter().all(|f| f.radius == 5.0));
    }

    #[test]
    fn test_selection_breeds_only_successful_foragers() {
        let mut sim = Simulation::new_with_seed(test_config(), 42);
        let mut survivors = sim.seed_population();
        survivors.truncate(3);
        survivors[0].food_consumed = 0;
        survivors[1].food_consumed = 1;
        survivors[2].food_consumed = 4;

        let next = sim.next_generation(&survivors);

        // Starved: none. One meal: one child. Two or more: two children.
        assert_eq!(next.len(), 3);
        for child in &next {
            assert_eq!(child.food_consumed, 0);
            assert_eq!(child.energy, sim.config.agents.initial_energy);
        }
    }

    #[test]
    fn test_run_records_history() {
        let mut sim = Simulation::new_with_seed(test_config(), 42);
        sim.run();

        assert!(!sim.history.snapshots.is_empty());
        assert!(sim.history.snapshots.len() <= 3);
        for (index, summary) in sim.history.snapshots.iter().enumerate() {
            assert_eq!(summary.generation, index as u32);
        }
    }

    #[test]
    fn test_callback_sees_every_generation() {
        let mut sim = Simulation::new_with_seed(test_config(), 9);
        let mut seen = Vec::new();
        sim.run_with_callback(|_, summary| seen.push(summary.generation));

        assert_eq!(seen.len(), sim.history.snapshots.len());
    }
}
