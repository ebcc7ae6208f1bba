//! Predator capability contract, plus a minimal reference predator.
//!
//! The environment only consumes the [`Adversary`] trait; any richer hunting
//! AI lives outside the core and plugs in through it.

use crate::agent::Agent;
use crate::point::{Bounds, Point};

/// Per-tick predator behavior.
pub trait Adversary {
    /// Current position, read by the environment for predation checks.
    fn position(&self) -> Point;

    /// Collision radius. Any agent within `radius + agent body radius` of
    /// the predator is removed from the population.
    fn radius(&self) -> f64;

    /// Advance one tick against the current population. Implementations may
    /// move themselves but must not mutate agents; kills are resolved by the
    /// environment afterwards.
    fn seek_agents(&mut self, population: &[Agent]);
}

/// Reference predator: steps straight toward the nearest agent each tick.
#[derive(Clone, Debug)]
pub struct Pursuer {
    pub position: Point,
    pub radius: f64,
    /// Distance covered per tick
    pub speed: f64,
    pub bounds: Bounds,
}

impl Pursuer {
    pub fn new(position: Point, radius: f64, speed: f64, bounds: Bounds) -> Self {
        Self {
            position,
            radius,
            speed,
            bounds,
        }
    }
}

impl Adversary for Pursuer {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn seek_agents(&mut self, population: &[Agent]) {
        let target = population
            .iter()
            .map(|agent| (self.position.distance_to(agent.position), agent.position))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, position)| position);

        if let Some(target) = target {
            let bearing = (target.y - self.position.y).atan2(target.x - self.position.x);
            let step = self.speed.min(self.position.distance_to(target));
            self.position.x = (self.position.x + bearing.cos() * step).clamp(0.0, self.bounds.width);
            self.position.y =
                (self.position.y + bearing.sin() * step).clamp(0.0, self.bounds.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::point::Bounds;

    fn prey_at(x: f64, y: f64) -> Agent {
        let config = Config::default();
        Agent::new(
            Point::new(x, y),
            config.agents.starting_traits,
            Bounds::new(500.0, 500.0),
            &config.agents,
        )
    }

    #[test]
    fn test_pursuer_closes_on_nearest_agent() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut pursuer = Pursuer::new(Point::new(100.0, 100.0), 8.0, 2.0, bounds);

        let population = vec![prey_at(110.0, 100.0), prey_at(400.0, 400.0)];
        pursuer.seek_agents(&population);

        assert!((pursuer.position.x - 102.0).abs() < 1e-9);
        assert!((pursuer.position.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pursuer_does_not_overshoot() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut pursuer = Pursuer::new(Point::new(100.0, 100.0), 8.0, 5.0, bounds);

        let population = vec![prey_at(101.0, 100.0)];
        pursuer.seek_agents(&population);

        assert!((pursuer.position.x - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_pursuer_idles_without_prey() {
        let bounds = Bounds::new(500.0, 500.0);
        let mut pursuer = Pursuer::new(Point::new(100.0, 100.0), 8.0, 2.0, bounds);

        pursuer.seek_agents(&[]);

        assert_eq!(pursuer.position, Point::new(100.0, 100.0));
    }
}
