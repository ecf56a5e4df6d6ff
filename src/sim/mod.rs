//! Deterministic simulation module
//!
//! Gameplay physics lives here. This module must stay pure:
//! - One fixed step per frame
//! - Seeded RNG only
//! - No drawing or peripheral dependencies

pub mod ball;
pub mod collision;
pub mod star;

pub use ball::{BallPhysics, BallState, BallStep, PhysicsBall};
pub use collision::{CatchTally, PlacementRegion, caught, scatter_stars};
pub use star::Star;
