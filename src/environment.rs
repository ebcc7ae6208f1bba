//! The arena: owns the population, food and predators and drives one
//! simulation tick.

use crate::adversary::Adversary;
use crate::agent::Agent;
use crate::config::Config;
use crate::food::Food;
use crate::point::{Bounds, Point};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The simulation arena.
///
/// Strictly single-threaded and turn-based: every mutation happens inside
/// [`Environment::update_environment`], and all randomness flows from one
/// seeded generator, so a fixed seed replays a run exactly.
pub struct Environment {
    pub population: Vec<Agent>,
    pub adversaries: Vec<Box<dyn Adversary>>,
    pub food: Vec<Food>,
    pub bounds: Bounds,
    /// Ticks elapsed
    pub time: u64,

    config: Config,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Environment {
    /// Create an environment with a random seed.
    pub fn new(
        population: Vec<Agent>,
        adversaries: Vec<Box<dyn Adversary>>,
        food: Vec<Food>,
        config: Config,
    ) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(population, adversaries, food, config, seed)
    }

    /// Create an environment with a specific seed for reproducibility.
    pub fn new_with_seed(
        population: Vec<Agent>,
        adversaries: Vec<Box<dyn Adversary>>,
        food: Vec<Food>,
        config: Config,
        seed: u64,
    ) -> Self {
        let bounds = Bounds::new(config.world.width, config.world.height);

        Self {
            population,
            adversaries,
            food,
            bounds,
            time: 0,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// One discrete simulation step:
    /// agent actions, foraging resolution, predator actions, predation.
    pub fn update_environment(&mut self) {
        // Phase 1: every active agent acts, in population order.
        for agent in &mut self.population {
            if agent.is_active() {
                agent.perform_action(&self.food, &self.config.agents, &mut self.rng);
            }
        }

        // Phase 2: resolve agent-food overlaps.
        self.resolve_foraging();

        // Phase 3: predators act against the current population.
        for adversary in &mut self.adversaries {
            adversary.seek_agents(&self.population);
        }

        // Phase 4: resolve predation.
        self.resolve_predation();

        self.time += 1;
    }

    /// Mark-then-sweep over a stable snapshot of the food set: each item is
    /// claimed by at most one agent (the first in population order), while
    /// one agent may claim several overlapping items. Sweeping afterwards
    /// keeps the scan safe from mid-iteration removal.
    fn resolve_foraging(&mut self) {
        let mut eaten = vec![false; self.food.len()];

        for agent in &mut self.population {
            let reach = agent.collision_radius(&self.config.agents);
            for (idx, item) in self.food.iter().enumerate() {
                if eaten[idx] {
                    continue;
                }
                if agent.position.distance_to(item.position) <= reach + item.radius {
                    agent.consume_food();
                    eaten[idx] = true;
                }
            }
        }

        let mut idx = 0;
        self.food.retain(|_| {
            let keep = !eaten[idx];
            idx += 1;
            keep
        });
    }

    /// Any overlap with a predator is lethal, whatever the agent's traits or
    /// energy. Positions and radii are snapshotted first so removals cannot
    /// disturb the scan.
    fn resolve_predation(&mut self) {
        if self.adversaries.is_empty() {
            return;
        }

        let hunters: Vec<(Point, f64)> = self
            .adversaries
            .iter()
            .map(|adversary| (adversary.position(), adversary.radius()))
            .collect();
        let body = self.config.agents.entity_radius;

        self.population.retain(|agent| {
            !hunters
                .iter()
                .any(|&(position, radius)| position.distance_to(agent.position) <= radius + body)
        });
    }

    /// Run a fixed number of ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.update_environment();
        }
    }

    /// Agents that still have energy to act.
    pub fn living_count(&self) -> usize {
        self.population.iter().filter(|a| a.is_active()).count()
    }

    /// Whether predation has emptied the population.
    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    /// Food items eaten by the current population this generation.
    pub fn total_food_consumed(&self) -> u32 {
        self.population.iter().map(|a| a.food_consumed).sum()
    }

    /// Seed for reproducibility.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adversary::Pursuer;
    use crate::point::Point;

    fn test_config() -> Config {
        Config::default()
    }

    fn idle_agent(config: &Config, x: f64, y: f64) -> Agent {
        // Zero energy: skips actions but still participates in collisions.
        let bounds = Bounds::new(config.world.width, config.world.height);
        let mut agent = Agent::new(
            Point::new(x, y),
            config.agents.starting_traits,
            bounds,
            &config.agents,
        );
        agent.energy = 0;
        agent.traits.size = 0;
        agent
    }

    #[test]
    fn test_collision_boundary_is_inclusive() {
        let config = test_config();
        // Agent radius 5 + size 0, food radius 5: exactly 10 units apart.
        let agent = idle_agent(&config, 0.0, 0.0);
        let food = vec![Food::new(Point::new(10.0, 0.0), 5.0)];

        let mut env = Environment::new_with_seed(vec![agent], Vec::new(), food, config, 1);
        env.update_environment();

        assert!(env.food.is_empty());
        assert_eq!(env.population[0].food_consumed, 1);
        assert_eq!(env.time, 1);
    }

    #[test]
    fn test_overlapping_agents_consume_food_once() {
        let config = test_config();
        let a = idle_agent(&config, 95.0, 100.0);
        let b = idle_agent(&config, 105.0, 100.0);
        let food = vec![Food::new(Point::new(100.0, 100.0), 5.0)];

        let mut env = Environment::new_with_seed(vec![a, b], Vec::new(), food, config, 2);
        env.update_environment();

        assert!(env.food.is_empty());
        // First agent in population order gets the credit.
        assert_eq!(env.population[0].food_consumed, 1);
        assert_eq!(env.population[1].food_consumed, 0);
        assert_eq!(env.total_food_consumed(), 1);
    }

    #[test]
    fn test_agent_can_consume_multiple_items_in_one_tick() {
        let config = test_config();
        let agent = idle_agent(&config, 100.0, 100.0);
        let food = vec![
            Food::new(Point::new(104.0, 100.0), 5.0),
            Food::new(Point::new(96.0, 100.0), 5.0),
            Food::new(Point::new(300.0, 300.0), 5.0),
        ];

        let mut env = Environment::new_with_seed(vec![agent], Vec::new(), food, config, 3);
        env.update_environment();

        assert_eq!(env.food.len(), 1);
        assert_eq!(env.population[0].food_consumed, 2);
    }

    #[test]
    fn test_predation_is_lethal_and_unconditional() {
        let config = test_config();
        let prey = idle_agent(&config, 100.0, 100.0);
        let bystander = idle_agent(&config, 400.0, 400.0);
        let bounds = Bounds::new(config.world.width, config.world.height);

        // Stationary predator sitting on top of the first agent.
        let predator: Box<dyn Adversary> =
            Box::new(Pursuer::new(Point::new(100.0, 100.0), 8.0, 0.0, bounds));

        let mut env =
            Environment::new_with_seed(vec![prey, bystander], vec![predator], Vec::new(), config, 4);
        env.update_environment();

        assert_eq!(env.population.len(), 1);
        assert_eq!(env.population[0].position, Point::new(400.0, 400.0));
    }

    #[test]
    fn test_predation_ignores_size_trait() {
        let config = test_config();
        let mut giant = idle_agent(&config, 100.0, 100.0);
        giant.traits.size = 50;
        let bounds = Bounds::new(config.world.width, config.world.height);

        // Out of body-radius range (8 + 5 = 13 < 14) even though the size
        // trait would bridge the gap if predation counted it.
        let predator: Box<dyn Adversary> =
            Box::new(Pursuer::new(Point::new(114.0, 100.0), 8.0, 0.0, bounds));

        let mut env = Environment::new_with_seed(vec![giant], vec![predator], Vec::new(), config, 5);
        env.update_environment();

        assert_eq!(env.population.len(), 1);
    }

    #[test]
    fn test_inactive_agents_hold_position() {
        let config = test_config();
        let agent = idle_agent(&config, 123.0, 321.0);

        let mut env = Environment::new_with_seed(vec![agent], Vec::new(), Vec::new(), config, 6);
        env.run(10);

        assert_eq!(env.population[0].position, Point::new(123.0, 321.0));
        assert_eq!(env.population[0].energy, 0);
        assert_eq!(env.time, 10);
    }

    #[test]
    fn test_empty_world_is_a_valid_steady_state() {
        let config = test_config();
        let mut env = Environment::new_with_seed(Vec::new(), Vec::new(), Vec::new(), config, 7);

        env.run(5);

        assert!(env.is_extinct());
        assert_eq!(env.living_count(), 0);
        assert_eq!(env.time, 5);
    }

    #[test]
    fn test_active_agent_depletes_energy_by_one_per_tick() {
        let mut config = test_config();
        config.agents.initial_energy = 5;
        let bounds = Bounds::new(config.world.width, config.world.height);
        let agent = Agent::new(
            Point::new(250.0, 250.0),
            config.agents.starting_traits,
            bounds,
            &config.agents,
        );

        let mut env = Environment::new_with_seed(vec![agent], Vec::new(), Vec::new(), config, 8);

        env.update_environment();
        assert_eq!(env.population[0].energy, 4);

        env.run(10);
        // Energy bottoms out at zero; the agent goes inactive, not negative.
        assert_eq!(env.population[0].energy, 0);
        assert_eq!(env.living_count(), 0);
        assert!(!env.is_extinct());
    }
}
