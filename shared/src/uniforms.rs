use bytemuck::{Pod, Zeroable};

use crate::WIND_TABLE_LEN;

/// One wind table slot.
///
/// Only `value` carries data. Uniform arrays use a 16 byte element stride, so
/// the shader sees `array<vec4<i32>, 512>` and the padding stays zero.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct WindEntry {
    pub value: i32,
    pub padding: [i32; 3],
}

impl WindEntry {
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            padding: [0; 3],
        }
    }
}

/// Uniform block bound at `@group(0) @binding(0)`
///
/// | field  | offset | size |
/// |--------|--------|------|
/// | `mvp`  | 0      | 64   |
/// | `wind` | 64     | 8192 |
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleUniforms {
    /// Model-view-projection matrix, column-major
    pub mvp: [f32; 16],
    pub wind: [WindEntry; WIND_TABLE_LEN],
}

pub const MVP_OFFSET: usize = 0;
pub const WIND_OFFSET: usize = 16 * core::mem::size_of::<f32>();
pub const WIND_ENTRY_STRIDE: usize = 4 * core::mem::size_of::<i32>();
pub const UNIFORM_BLOCK_SIZE: usize = WIND_OFFSET + WIND_TABLE_LEN * WIND_ENTRY_STRIDE;

impl ParticleUniforms {
    /// Identity transform and the given wind table
    pub fn new(wind: [WindEntry; WIND_TABLE_LEN]) -> Self {
        let mut mvp = [0.0; 16];
        mvp[0] = 1.0;
        mvp[5] = 1.0;
        mvp[10] = 1.0;
        mvp[15] = 1.0;
        Self { mvp, wind }
    }

    #[inline]
    pub fn set_mvp(&mut self, cols: [f32; 16]) {
        self.mvp = cols;
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn layout_matches_wgsl_uniform_block() {
        assert_eq!(offset_of!(ParticleUniforms, mvp), MVP_OFFSET);
        assert_eq!(offset_of!(ParticleUniforms, wind), WIND_OFFSET);
        assert_eq!(WIND_OFFSET, 64);
        assert_eq!(size_of::<WindEntry>(), WIND_ENTRY_STRIDE);
        assert_eq!(size_of::<ParticleUniforms>(), UNIFORM_BLOCK_SIZE);
        assert_eq!(UNIFORM_BLOCK_SIZE, 64 + 512 * 16);
    }

    #[test]
    fn wind_value_lands_at_entry_stride() {
        let mut wind = [WindEntry::default(); WIND_TABLE_LEN];
        wind[3] = WindEntry::new(0x0102_0304);
        let uniforms = ParticleUniforms::new(wind);
        let bytes = uniforms.as_bytes();

        let start = WIND_OFFSET + 3 * WIND_ENTRY_STRIDE;
        let value = i32::from_ne_bytes([
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ]);
        assert_eq!(value, 0x0102_0304);
        assert!(bytes[start + 4..start + WIND_ENTRY_STRIDE]
            .iter()
            .all(|b| *b == 0));
    }

    #[test]
    fn set_mvp_overwrites_only_the_matrix() {
        let mut uniforms = ParticleUniforms::new([WindEntry::new(7); WIND_TABLE_LEN]);
        let cols: [f32; 16] = core::array::from_fn(|i| i as f32);
        uniforms.set_mvp(cols);

        assert_eq!(uniforms.mvp, cols);
        assert!(uniforms.wind.iter().all(|w| *w == WindEntry::new(7)));
    }
}
