//! Per-frame uniform data.
//!
//! Contains the GPU-visible uniform structs and the transform composition
//! run once per tick. Both structs are `Pod`; their byte views go straight
//! into the uniform slots.

use bytemuck::{Pod, Zeroable};
use lattice_core::config::CameraConfig;
use lattice_core::interaction::RotationState;
use lattice_core::math::{Mat4, Vec2, Vec3};

/// The per-frame transform uniform (slot 1).
///
/// Transient: recomputed every tick from the rotation state and the fixed
/// camera, valid only for the frame that produced it.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Composed projection-view-rotation transform.
    pub transform: Mat4,
}

impl FrameUniforms {
    /// Wraps a composed frame transform.
    #[must_use]
    pub const fn new(transform: Mat4) -> Self {
        Self { transform }
    }

    /// Returns the uniform as bytes for the slot upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Byte size of the uniform.
    #[must_use]
    pub const fn size() -> u64 {
        std::mem::size_of::<Self>() as u64
    }
}

/// The per-frame cursor uniform (slot 2), padded to 16 bytes to satisfy
/// the WGSL struct layout.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CursorUniform {
    /// Cursor position in `[-1, 1]` NDC.
    pub position: [f32; 2],
    /// Pads the struct to the WGSL uniform stride.
    pub _padding: [f32; 2],
}

impl CursorUniform {
    /// Wraps a cursor position in `[-1, 1]` NDC.
    #[must_use]
    pub const fn new(cursor: Vec2) -> Self {
        Self {
            position: [cursor.x, cursor.y],
            _padding: [0.0, 0.0],
        }
    }

    /// Returns the uniform as bytes for the transient bind.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Composes the frame transform, in fixed order:
///
/// `perspective(fov_y, aspect, near, far) x translation(0, 0, -distance)
/// x rotation_y(about_y) x rotation_x(about_x)`
#[must_use]
pub fn compose_transform(camera: &CameraConfig, rotation: RotationState, aspect: f32) -> Mat4 {
    let projection = Mat4::perspective(camera.fov_y_radians(), aspect, camera.near, camera.far);
    let pull_back = Mat4::translation(0.0, 0.0, -camera.distance);
    let spin_y = Mat4::rotation(rotation.about_y, Vec3::Y);
    let spin_x = Mat4::rotation(rotation.about_x, Vec3::X);

    projection * pull_back * spin_y * spin_x
}
