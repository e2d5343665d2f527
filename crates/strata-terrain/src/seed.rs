//! Deterministic seeding and hashing.
//!
//! Provides the seed sequence every noise module draws its seed from, integer
//! lattice hashes used by the cellular generators, and libm-backed math so
//! feature point placement is bit-exact across platforms.

use glam::DVec2;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Seed derivation
// ---------------------------------------------------------------------------

/// Ordered stream of sub-seeds derived from the world seed.
///
/// Modules draw their seeds in a fixed construction order, so the same world
/// seed always wires the same seed into the same module regardless of thread
/// or platform.
pub struct SeedSequence {
    rng: ChaCha8Rng,
}

impl SeedSequence {
    /// Start a sequence for the given world seed.
    pub fn new(world_seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(world_seed),
        }
    }

    /// Next seed for a `noise` crate module.
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Next seed for the lattice hashes in this module.
    pub fn next_i32(&mut self) -> i32 {
        self.rng.next_u32() as i32
    }
}

// ---------------------------------------------------------------------------
// Lattice hashing
// ---------------------------------------------------------------------------

const X_PRIME: i32 = 1619;
const Z_PRIME: i32 = 6971;

/// Hash an integer lattice point.
#[inline]
pub fn hash2(seed: i32, x: i32, z: i32) -> i32 {
    let mut hash = seed ^ X_PRIME.wrapping_mul(x) ^ Z_PRIME.wrapping_mul(z);
    hash = hash.wrapping_mul(hash).wrapping_mul(hash).wrapping_mul(60493);
    (hash >> 13) ^ hash
}

/// Pseudo-random value in `[-1, 1]` for an integer lattice point.
#[inline]
pub fn value2(seed: i32, x: i32, z: i32) -> f32 {
    let n = seed ^ X_PRIME.wrapping_mul(x) ^ Z_PRIME.wrapping_mul(z);
    let n = n.wrapping_mul(n).wrapping_mul(n).wrapping_mul(60493);
    (n as f64 / 2_147_483_648.0) as f32
}

/// Pseudo-random offset for the feature point of lattice cell `(x, z)`.
///
/// The offset lies within a disc of radius 0.5 around the origin, so
/// `cell + 0.5 + offset * jitter` stays inside the cell for `jitter <= 1`.
#[inline]
pub fn jitter_offset(seed: i32, x: i32, z: i32) -> DVec2 {
    let hash = hash2(seed, x, z) as u32;
    let angle = (hash & 0xFFFF) as f64 / 65_536.0 * std::f64::consts::TAU;
    let radius = ((hash >> 16) & 0xFF) as f64 / 255.0 * 0.5;
    DVec2::new(det_cos(angle) * radius, det_sin(angle) * radius)
}

// ---------------------------------------------------------------------------
// Deterministic math (libm)
// ---------------------------------------------------------------------------

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Deterministic sqrt using libm.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Deterministic floor to `i32` using libm.
#[inline]
pub fn det_floor(x: f64) -> i32 {
    libm::floor(x) as i32
}
