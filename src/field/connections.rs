//! Proximity links between particles
//!
//! Brute-force O(n²) scan over unordered pairs. With at most 150 particles
//! that is ~11k distance checks per frame.

use crate::field::particle::Particle;

/// A link between two particles closer than the link distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower index of the pair
    pub particle_a: usize,
    /// Higher index of the pair
    pub particle_b: usize,
    pub distance: f64,
    /// `(1 - distance / max_distance) * max_opacity`
    pub alpha: f64,
}

/// Every unordered pair `(i, j)`, `i < j`, closer than `max_distance`
pub fn find_connections(particles: &[Particle], max_distance: f64, max_opacity: f64) -> Vec<Connection> {
    let max_dist_sq = max_distance * max_distance;
    let mut connections = Vec::new();

    for (i, a) in particles.iter().enumerate() {
        for (offset, b) in particles[i + 1..].iter().enumerate() {
            let dx = a.position.x - b.position.x;
            let dy = a.position.y - b.position.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= max_dist_sq {
                continue;
            }

            let distance = dist_sq.sqrt();
            connections.push(Connection {
                particle_a: i,
                particle_b: i + 1 + offset,
                distance,
                alpha: (1.0 - distance / max_distance) * max_opacity,
            });
        }
    }

    connections
}
