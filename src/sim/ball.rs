//! Ball physics
//!
//! Gravity pulls the ball down (screen y grows downward). The floor is
//! inelastic: every bounce scales both velocity components by the energy-loss
//! coefficient. Side walls are perfectly elastic so horizontal travel stays
//! predictable when aiming. There is no ceiling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction_deg;

/// Motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Waiting for launch, or stopped on the floor
    AtRest,
    Moving,
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStep {
    /// At rest, nothing integrated
    Idle,
    Moved,
    /// Hit the floor or a wall this step
    Bounced,
    /// Came to rest on the floor this step
    Stopped,
}

/// Physics parameters for a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    pub gravity: f32,
    /// Velocity fraction kept after a floor bounce
    pub energy_loss: f32,
    /// Rest threshold for both velocity components
    pub rest_epsilon: f32,
    /// Play-field size (width, height)
    pub bounds: Vec2,
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsBall {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl PhysicsBall {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            state: BallState::AtRest,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.state == BallState::Moving
    }

    /// Launch from rest. `angle_deg` is measured from +x towards +y (down).
    /// Returns false (and leaves the ball alone) if it is already moving.
    pub fn launch(&mut self, angle_deg: f32, speed: f32) -> bool {
        if self.is_moving() {
            log::warn!("launch ignored: ball already moving");
            return false;
        }
        self.vel = direction_deg(angle_deg) * speed;
        self.state = BallState::Moving;
        log::debug!("launch angle={} speed={} vel={:?}", angle_deg, speed, self.vel);
        true
    }

    /// Advance one tick
    pub fn step(&mut self, physics: &BallPhysics) -> BallStep {
        if !self.is_moving() {
            return BallStep::Idle;
        }

        let floor = (physics.bounds.y - self.radius).abs();
        let left_wall = self.radius;
        let right_wall = (physics.bounds.x - self.radius).abs();
        let mut bounced = false;

        self.pos.y += self.vel.y;
        self.vel.y += physics.gravity;

        if self.pos.y >= floor
            && self.vel.x.abs() < physics.rest_epsilon
            && self.vel.y.abs() < physics.rest_epsilon
        {
            self.pos.y = floor;
            self.vel = Vec2::ZERO;
            self.state = BallState::AtRest;
            log::debug!("ball stopped at x={:.1}", self.pos.x);
            return BallStep::Stopped;
        }

        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vel.y = -self.vel.y * physics.energy_loss;
            self.vel.x *= physics.energy_loss;
            bounced = true;
        }

        self.pos.x += self.vel.x;
        if self.pos.x >= right_wall {
            self.pos.x = right_wall;
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if self.pos.x < left_wall {
            self.pos.x = left_wall;
            self.vel.x = -self.vel.x;
            bounced = true;
        }

        if bounced {
            BallStep::Bounced
        } else {
            BallStep::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> BallPhysics {
        BallPhysics {
            gravity: 0.2,
            energy_loss: 0.6,
            rest_epsilon: 1.0,
            bounds: Vec2::new(128.0, 64.0),
        }
    }

    #[test]
    fn test_launch_sets_velocity() {
        let mut ball = PhysicsBall::new(Vec2::new(20.0, 40.0), 3.0);
        assert!(ball.launch(0.0, 5.0));
        assert!((ball.vel.x - 5.0).abs() < 1e-5);
        assert!(ball.vel.y.abs() < 1e-5);
        assert!(ball.is_moving());
    }

    #[test]
    fn test_launch_while_moving_is_rejected() {
        let mut ball = PhysicsBall::new(Vec2::new(20.0, 40.0), 3.0);
        ball.launch(-40.0, 5.0);
        let vel = ball.vel;
        assert!(!ball.launch(90.0, 1.0));
        assert_eq!(ball.vel, vel);
    }

    #[test]
    fn test_rest_is_idle() {
        let mut ball = PhysicsBall::new(Vec2::new(20.0, 40.0), 3.0);
        assert_eq!(ball.step(&physics()), BallStep::Idle);
        assert_eq!(ball.pos, Vec2::new(20.0, 40.0));
    }

    #[test]
    fn test_floor_bounce_loses_energy() {
        let mut ball = PhysicsBall::new(Vec2::new(60.0, 58.0), 3.0);
        ball.launch(90.0, 6.0);
        let before = ball.vel.y + 0.2;
        assert_eq!(ball.step(&physics()), BallStep::Bounced);
        assert_eq!(ball.pos.y, 61.0);
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.y.abs() < before.abs());
    }

    #[test]
    fn test_side_walls_are_elastic() {
        let mut ball = PhysicsBall::new(Vec2::new(120.0, 20.0), 3.0);
        ball.launch(0.0, 8.0);
        assert_eq!(ball.step(&physics()), BallStep::Bounced);
        assert_eq!(ball.pos.x, 125.0);
        assert!((ball.vel.x + 8.0).abs() < 1e-5);

        let mut ball = PhysicsBall::new(Vec2::new(5.0, 20.0), 3.0);
        ball.launch(180.0, 8.0);
        assert_eq!(ball.step(&physics()), BallStep::Bounced);
        assert_eq!(ball.pos.x, 3.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_eventually_comes_to_rest_once() {
        let mut ball = PhysicsBall::new(Vec2::new(20.0, 40.0), 3.0);
        ball.launch(-40.0, 7.0);
        let mut stops = 0;
        for _ in 0..5000 {
            if ball.step(&physics()) == BallStep::Stopped {
                stops += 1;
            }
        }
        assert_eq!(stops, 1);
        assert_eq!(ball.state, BallState::AtRest);
        assert_eq!(ball.pos.y, 61.0);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_strong_gravity_keeps_bouncing() {
        // gravity / (1 - energy_loss) = 1.25, above the rest threshold
        let heavy = BallPhysics {
            gravity: 0.5,
            ..physics()
        };
        let mut ball = PhysicsBall::new(Vec2::new(20.0, 20.0), 3.0);
        ball.launch(-40.0, 3.0);
        for _ in 0..10_000 {
            assert_ne!(ball.step(&heavy), BallStep::Stopped);
        }
        assert!(ball.is_moving());
    }
}
