//! CPU-side generation of the initial particle state
//!
//! The arrays built here only live until they are uploaded; see
//! [`crate::graphics::buffers::ParticleBuffers::upload`], which consumes them.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use shared::{
    PackedVelocity, ParticlePosition, WindEntry, POSITION_DIVISOR, POSITION_OFFSET,
    POSITION_STEPS, WIND_TABLE_LEN, WIND_VALUE_RANGE,
};

/// Particles per independently seeded generation chunk
pub const POSITION_CHUNK: usize = 1 << 16;

/// Initial particle state, ready to upload
#[derive(Clone, Debug)]
pub struct ParticleStaging {
    pub positions: Vec<ParticlePosition>,
    pub velocities: Vec<PackedVelocity>,
    pub wind: [WindEntry; WIND_TABLE_LEN],
}

impl ParticleStaging {
    /// Generate `num_particles` positions, zero velocities and the wind table
    ///
    /// The same `(num_particles, seed)` always produces the same data,
    /// independent of how many threads rayon uses.
    pub fn generate(num_particles: u32, seed: u64) -> Self {
        Self {
            positions: generate_positions(num_particles as usize, seed),
            velocities: zeroed_velocities(num_particles as usize),
            wind: generate_wind_table(seed),
        }
    }

    pub fn num_particles(&self) -> u32 {
        self.positions.len() as u32
    }
}

/// Map a draw from `0..POSITION_STEPS` onto the `[-10, 10)` cube edge
#[inline]
fn coordinate(rng: &mut StdRng) -> f32 {
    (rng.gen_range(0..POSITION_STEPS) as f32 / POSITION_DIVISOR) - POSITION_OFFSET
}

/// Uniformly random positions in the cube, `w == 1.0`
///
/// Chunk `i` draws from its own RNG seeded with `seed + 1 + i`, so chunks can
/// be filled in parallel without changing the result.
pub fn generate_positions(num_particles: usize, seed: u64) -> Vec<ParticlePosition> {
    let mut positions = vec![[0.0, 0.0, 0.0, 1.0]; num_particles];

    positions
        .par_chunks_mut(POSITION_CHUNK)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1 + chunk_idx as u64));
            for p in chunk.iter_mut() {
                *p = [
                    coordinate(&mut rng),
                    coordinate(&mut rng),
                    coordinate(&mut rng),
                    1.0,
                ];
            }
        });

    positions
}

pub fn zeroed_velocities(num_particles: usize) -> Vec<PackedVelocity> {
    vec![PackedVelocity::ZERO; num_particles]
}

/// Wind table: one value in `0..1000` per slot, padding left at zero
pub fn generate_wind_table(seed: u64) -> [WindEntry; WIND_TABLE_LEN] {
    let mut rng = StdRng::seed_from_u64(seed);
    std::array::from_fn(|_| WindEntry::new(rng.gen_range(0..WIND_VALUE_RANGE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DEFAULT_SEED;

    #[test]
    fn positions_lie_in_cube_with_unit_w() {
        let positions = generate_positions(10_000, DEFAULT_SEED);
        assert_eq!(positions.len(), 10_000);
        for p in &positions {
            for c in &p[..3] {
                assert!((-10.0..10.0).contains(c), "coordinate {c} out of range");
            }
            assert_eq!(p[3], 1.0);
        }
    }

    #[test]
    fn positions_span_multiple_chunks_deterministically() {
        let n = POSITION_CHUNK * 2 + 17;
        let a = generate_positions(n, 7);
        let b = generate_positions(n, 7);
        assert_eq!(a, b);

        // chunks are seeded independently, so the first particle of each chunk differs
        assert_ne!(a[0], a[POSITION_CHUNK]);
    }

    #[test]
    fn different_seeds_give_different_positions() {
        assert_ne!(generate_positions(64, 1), generate_positions(64, 2));
    }

    #[test]
    fn velocities_start_at_zero() {
        let velocities = zeroed_velocities(1234);
        assert_eq!(velocities.len(), 1234);
        assert!(velocities.iter().all(PackedVelocity::is_zero));

        let as_floats: &[f32] = bytemuck::cast_slice(&velocities);
        assert_eq!(as_floats.len(), 2 * 1234);
        assert!(as_floats.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn wind_table_values_and_padding() {
        let wind = generate_wind_table(DEFAULT_SEED);
        assert_eq!(wind.len(), 512);
        for entry in &wind {
            assert!((0..1000).contains(&entry.value));
            assert_eq!(entry.padding, [0, 0, 0]);
        }
        // not a constant table
        assert!(wind.iter().any(|w| w.value != wind[0].value));
    }

    #[test]
    fn staging_counts_match() {
        let staging = ParticleStaging::generate(100, DEFAULT_SEED);
        assert_eq!(staging.num_particles(), 100);
        assert_eq!(staging.positions.len(), staging.velocities.len());
    }
}
