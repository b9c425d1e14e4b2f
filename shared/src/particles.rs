use bytemuck::{Pod, Zeroable};

/// Particle position as stored on the GPU: `(x, y, z, w)` with `w == 1.0`
///
/// Matches `array<vec4<f32>>` in the vertex shader.
pub type ParticlePosition = [f32; 4];

/// Four half-precision channels packed into two words
///
/// The vertex shader reads this as `vec2<u32>` and unpacks it with
/// `unpack2x16float`: `.x` holds velocity `(x, y)`, `.y` holds `(z, unused)`.
/// The footprint is the same as two `f32`s per particle.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVelocity(pub [u32; 2]);

impl PackedVelocity {
    pub const ZERO: Self = Self([0, 0]);

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0]
    }
}

#[inline]
pub const fn position_buffer_size(num_particles: u32) -> u64 {
    num_particles as u64 * core::mem::size_of::<ParticlePosition>() as u64
}

#[inline]
pub const fn velocity_buffer_size(num_particles: u32) -> u64 {
    num_particles as u64 * core::mem::size_of::<PackedVelocity>() as u64
}
