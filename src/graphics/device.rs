//! Adapter and device setup for rendering
//!
//! This module handles finding an adapter that can present to the window
//! surface and creating a device with the features the particle shader needs.

use shared::particles::{position_buffer_size, velocity_buffer_size};

use crate::{error::CrateResult, graphics::error::GraphicsError};

/// The vertex shader writes particle state back into storage buffers
pub fn required_features() -> wgpu::Features {
    wgpu::Features::VERTEX_WRITABLE_STORAGE
}

/// Default limits, raised where the particle buffers need more room
pub fn required_limits(num_particles: u32) -> wgpu::Limits {
    let defaults = wgpu::Limits::default();
    let largest_binding =
        position_buffer_size(num_particles).max(velocity_buffer_size(num_particles));

    wgpu::Limits {
        max_storage_buffer_binding_size: defaults
            .max_storage_buffer_binding_size
            .max(largest_binding.min(u32::MAX as u64) as u32),
        max_buffer_size: defaults.max_buffer_size.max(largest_binding),
        ..defaults
    }
}

/// Check `available` covers `required`, naming the first limit that does not
pub fn check_limits(available: &wgpu::Limits, required: &wgpu::Limits) -> CrateResult<()> {
    let checks = [
        (
            "max_storage_buffer_binding_size",
            available.max_storage_buffer_binding_size as u64,
            required.max_storage_buffer_binding_size as u64,
        ),
        (
            "max_buffer_size",
            available.max_buffer_size,
            required.max_buffer_size,
        ),
        (
            "max_uniform_buffer_binding_size",
            available.max_uniform_buffer_binding_size as u64,
            required.max_uniform_buffer_binding_size as u64,
        ),
    ];

    for (name, available, required) in checks {
        if available < required {
            return Err(GraphicsError::LimitTooLow {
                name,
                available,
                required,
            }
            .into());
        }
    }
    Ok(())
}

pub fn backend_name(backend: wgpu::Backend) -> &'static str {
    match backend {
        wgpu::Backend::Vulkan => "Vulkan",
        wgpu::Backend::Metal => "Metal",
        wgpu::Backend::Dx12 => "DirectX 12",
        wgpu::Backend::Gl => "OpenGL",
        wgpu::Backend::BrowserWebGpu => "WebGPU",
        _ => "Unknown",
    }
}

/// Pick a high-performance adapter able to present to `surface`
pub async fn select_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
) -> CrateResult<wgpu::Adapter> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(surface),
        })
        .await?;

    let info = adapter.get_info();
    tracing::info!(
        "Selected adapter: {} ({}, {:?}, driver {})",
        info.name,
        backend_name(info.backend),
        info.device_type,
        info.driver
    );
    Ok(adapter)
}

/// Create the logical device and queue for `num_particles` particles
pub async fn request_device(
    adapter: &wgpu::Adapter,
    num_particles: u32,
) -> CrateResult<(wgpu::Device, wgpu::Queue)> {
    let required_features = required_features();
    let missing = required_features - adapter.features();
    if !missing.is_empty() {
        return Err(GraphicsError::MissingFeatures {
            adapter: adapter.get_info().name,
            missing,
        }
        .into());
    }

    let required_limits = required_limits(num_particles);
    check_limits(&adapter.limits(), &required_limits)?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("Particles Device"),
            required_features,
            required_limits,
            memory_hints: wgpu::MemoryHints::Performance,
            ..Default::default()
        })
        .await?;

    Ok((device, queue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_writable_storage_is_required() {
        assert!(required_features().contains(wgpu::Features::VERTEX_WRITABLE_STORAGE));
    }

    #[test]
    fn limits_cover_four_million_positions() {
        let limits = required_limits(shared::N_PARTICLES);
        let positions = 4_000_000u64 * 16;
        assert!(limits.max_storage_buffer_binding_size as u64 >= positions);
        assert!(limits.max_buffer_size >= positions);
    }

    #[test]
    fn limits_never_drop_below_defaults() {
        let defaults = wgpu::Limits::default();
        let limits = required_limits(1);
        assert_eq!(
            limits.max_storage_buffer_binding_size,
            defaults.max_storage_buffer_binding_size
        );
        assert_eq!(limits.max_buffer_size, defaults.max_buffer_size);
    }

    #[test]
    fn uniform_block_fits_default_uniform_binding() {
        let limits = required_limits(shared::N_PARTICLES);
        assert!(
            limits.max_uniform_buffer_binding_size as usize
                >= shared::uniforms::UNIFORM_BLOCK_SIZE
        );
    }

    #[test]
    fn check_limits_names_the_short_limit() {
        let required = required_limits(shared::N_PARTICLES);
        let available = wgpu::Limits {
            max_storage_buffer_binding_size: 1024,
            ..required.clone()
        };
        let err = check_limits(&available, &required).unwrap_err();
        assert!(err.to_string().contains("max_storage_buffer_binding_size"));
        assert!(check_limits(&required, &required).is_ok());
    }
}
