//! Agent structure and behavior.

use crate::config::{AgentConfig, MutationConfig};
use crate::food::Food;
use crate::point::{Bounds, Point};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Heritable traits, mutated on reproduction. All values are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    /// Body size; added to the fixed radius for food collisions
    pub size: u32,
    /// Reach of a single undirected move, per axis
    pub speed: u32,
    /// Sensing reach; the vision radius is this times a configured multiplier
    pub vision: u32,
    /// Reserved for contests between agents
    pub strength: u32,
}

impl Traits {
    /// Derive offspring traits, each passed independently through mutation.
    pub fn mutated(&self, mutation: &MutationConfig, rng: &mut impl Rng) -> Traits {
        Traits {
            size: mutation.mutate_trait(self.size, rng),
            speed: mutation.mutate_trait(self.speed, rng),
            vision: mutation.mutate_trait(self.vision, rng),
            strength: mutation.mutate_trait(self.strength, rng),
        }
    }
}

/// A mobile, trait-bearing agent.
///
/// Agents forage while they have energy, go inactive when it runs out, and
/// leave the population only through predation.
#[derive(Clone, Debug)]
pub struct Agent {
    pub position: Point,
    pub traits: Traits,
    /// Depleted by movement; an agent with zero energy takes no actions
    pub energy: u32,
    /// Facing direction in radians
    pub heading: f64,
    pub bounds: Bounds,
    /// Food items eaten this generation
    pub food_consumed: u32,
}

impl Agent {
    /// Create a new agent facing the arena center.
    pub fn new(position: Point, traits: Traits, bounds: Bounds, config: &AgentConfig) -> Self {
        let center = bounds.center();
        let heading = (center.y - position.y).atan2(center.x - position.x);

        Self {
            position,
            traits,
            energy: config.initial_energy,
            heading,
            bounds,
            food_consumed: 0,
        }
    }

    /// Whether the agent can still act this tick.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.energy > 0
    }

    /// Effective radius for food collisions: fixed body radius plus size.
    #[inline]
    pub fn collision_radius(&self, config: &AgentConfig) -> f64 {
        config.entity_radius + self.traits.size as f64
    }

    /// Displace the agent by the given deltas, clamped per axis into the
    /// arena. Costs exactly one energy whenever it executes, even when the
    /// clamp leaves the position unchanged. No-op at zero energy.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if self.energy == 0 {
            return;
        }

        self.position.x = (self.position.x + dx).clamp(0.0, self.bounds.width);
        self.position.y = (self.position.y + dy).clamp(0.0, self.bounds.height);
        self.energy -= 1;
    }

    /// Undirected move: each axis delta drawn uniformly from the integers
    /// `[-speed, speed]`.
    pub fn translate_random(&mut self, rng: &mut impl Rng) {
        let reach = self.traits.speed as i64;
        let dx = rng.gen_range(-reach..=reach) as f64;
        let dy = rng.gen_range(-reach..=reach) as f64;
        self.translate(dx, dy);
    }

    /// Ambient motion: perturb the heading by up to 15 degrees, reflect off
    /// arena walls, then take a unit step. Wandering displacement is at most
    /// one unit per axis regardless of the speed trait; only undirected
    /// moves scale with speed.
    pub fn wander(&mut self, rng: &mut impl Rng) {
        if self.energy == 0 {
            return;
        }

        let max_turn = 15.0_f64.to_radians();
        self.heading += rng.gen_range(-max_turn..=max_turn);

        let dx = self.heading.cos();
        let dy = self.heading.sin();

        // Reflect the heading if the step would land on a wall. The current
        // step keeps its deltas; the reflection takes effect next tick. Both
        // axes can reflect in the same call (a corner hit).
        let next_x = (self.position.x + dx).clamp(0.0, self.bounds.width);
        let next_y = (self.position.y + dy).clamp(0.0, self.bounds.height);
        if next_x == 0.0 || next_x == self.bounds.width {
            self.heading = PI - self.heading;
        }
        if next_y == 0.0 || next_y == self.bounds.height {
            self.heading = -self.heading;
        }
        self.heading = self.heading.rem_euclid(2.0 * PI);

        self.translate(dx, dy);
    }

    /// Face the target and take a unit step toward it.
    pub fn move_towards(&mut self, target: Point) {
        self.heading = (target.y - self.position.y).atan2(target.x - self.position.x);
        self.translate(self.heading.cos(), self.heading.sin());
    }

    /// Scan the food set and head for the nearest item within the vision
    /// radius (inclusive). Distance ties keep the first item encountered.
    /// With nothing in sight, wander instead.
    pub fn sense_environment(&mut self, food: &[Food], config: &AgentConfig, rng: &mut impl Rng) {
        let vision_radius = self.traits.vision as f64 * config.vision_multiplier;

        let mut closest: Option<(f64, Point)> = None;
        for item in food {
            let dist = self.position.distance_to(item.position);
            if dist > vision_radius {
                continue;
            }
            match closest {
                Some((best, _)) if dist >= best => {}
                _ => closest = Some((dist, item.position)),
            }
        }

        match closest {
            Some((_, target)) => self.move_towards(target),
            None => self.wander(rng),
        }
    }

    /// One tick of behavior. Inactive agents do nothing.
    pub fn perform_action(&mut self, food: &[Food], config: &AgentConfig, rng: &mut impl Rng) {
        if self.energy == 0 {
            return;
        }
        self.sense_environment(food, config, rng);
    }

    /// Record a consumed food item. Eating never restores energy; starvation
    /// pressure is independent of foraging success.
    pub fn consume_food(&mut self) {
        self.food_consumed += 1;
    }

    /// Produce an offspring at the parent's position: traits independently
    /// mutated, energy and food counter reset, heading recomputed toward the
    /// arena center.
    pub fn reproduce(
        &self,
        config: &AgentConfig,
        mutation: &MutationConfig,
        rng: &mut impl Rng,
    ) -> Agent {
        Agent::new(
            self.position,
            self.traits.mutated(mutation, rng),
            self.bounds,
            config,
        )
    }
}
