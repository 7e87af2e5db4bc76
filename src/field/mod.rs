//! Particle field simulation
//!
//! Provides the drifting particle set with:
//! - per-tick drift with wrap-around edges
//! - pointer nudge and alpha boost inside the interaction radius
//! - pairwise proximity links drawn over the particles

pub mod connections;
pub mod engine;
pub mod error;
pub mod particle;

pub use connections::{find_connections, Connection};
pub use engine::{EngineState, ParticleField};
pub use error::{FieldError, FieldResult};
pub use particle::Particle;
