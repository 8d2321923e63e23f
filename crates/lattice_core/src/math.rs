//! Mathematical types shared between the lattice generator and the renderer.
//!
//! Matrices are stored column-major so they upload byte-for-byte as a WGSL
//! `mat4x4<f32>`. All types are `Pod` and carry no padding surprises.

use bytemuck::{Pod, Zeroable};

/// 2D Vector - cursor positions, viewport extents
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// 3D Vector - lattice points, rotation axes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns the vector scaled to unit length.
    ///
    /// A zero-length input is returned unchanged; rotations built from it
    /// are undefined, and callers must supply a non-zero axis.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return self;
        }
        self * (1.0 / len)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// 4D Vector - homogeneous coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vec4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vec4 {
    /// Creates a new Vec4
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extends a Vec3 with the given w component
    #[must_use]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drops the w component
    #[must_use]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// 4x4 homogeneous transform, column-major.
///
/// `cols[j]` is the j-th column, so the memory layout matches WGSL's
/// `mat4x4<f32>` and the struct can be uploaded with `bytemuck` as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    /// Columns of the matrix.
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Builds a rotation of `angle` radians about `axis`.
    ///
    /// The axis is normalized internally; it does not need unit length but
    /// must be non-zero (a zero axis yields an undefined rotation). The
    /// 3x3 Rodrigues rotation is embedded in a 4x4 with zero translation
    /// and homogeneous row (0, 0, 0, 1). `angle = 0` yields the identity
    /// up to floating rounding.
    #[must_use]
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        let a = axis.normalized();
        let (s, c) = angle.sin_cos();
        let ci = 1.0 - c;
        let (x, y, z) = (a.x, a.y, a.z);

        Self {
            cols: [
                [c + x * x * ci, y * x * ci + z * s, z * x * ci - y * s, 0.0],
                [x * y * ci - z * s, c + y * y * ci, z * y * ci + x * s, 0.0],
                [x * z * ci + y * s, y * z * ci - x * s, c + z * z * ci, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Builds a right-handed perspective projection.
    ///
    /// `y = 1 / tan(fov_y / 2)`, `x = y / aspect`,
    /// `z = far / (near - far)`; view-space z lands in clip-space w for the
    /// perspective divide. The builder does not validate its inputs:
    /// callers must guard `aspect <= 0` and `near == far`.
    #[must_use]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let y = 1.0 / (fov_y * 0.5).tan();
        let x = y / aspect;
        let z = far / (near - far);

        Self {
            cols: [
                [x, 0.0, 0.0, 0.0],
                [0.0, y, 0.0, 0.0],
                [0.0, 0.0, z, -1.0],
                [0.0, 0.0, z * near, 0.0],
            ],
        }
    }

    /// Builds a translation transform.
    #[must_use]
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Applies the transform to a homogeneous vector.
    #[must_use]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.cols;
        Vec4::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
            m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
        )
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut cols = [[0.0f32; 4]; 4];
        for (j, col) in cols.iter_mut().enumerate() {
            for (i, cell) in col.iter_mut().enumerate() {
                for k in 0..4 {
                    *cell += self.cols[k][i] * rhs.cols[j][k];
                }
            }
        }
        Self { cols }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-4;

    fn assert_vec3_near(a: Vec3, b: Vec3, eps: f32) {
        assert!((a.x - b.x).abs() < eps, "x: {} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() < eps, "y: {} vs {}", a.y, b.y);
        assert!((a.z - b.z).abs() < eps, "z: {} vs {}", a.z, b.z);
    }

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::X;
        let v2 = Vec3::Y;

        assert_eq!(v1 + v2, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(v1.cross(v2), Vec3::Z);
        assert_eq!(Vec3::new(0.0, 3.0, 0.0).normalized(), Vec3::Y);
    }

    #[test]
    fn test_normalized_zero_vector_is_unchanged() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_vec3_bytemuck() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 12); // 3 * 4 bytes
    }

    #[test]
    fn test_rotation_zero_angle_is_identity() {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(1.0, -2.0, 0.5)] {
            let m = Mat4::rotation(0.0, axis);
            for j in 0..4 {
                for i in 0..4 {
                    assert!((m.cols[j][i] - Mat4::IDENTITY.cols[j][i]).abs() < EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_rotation_half_turn_about_y() {
        let m = Mat4::rotation(PI, Vec3::Y);
        let rotated = m.transform(Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert!((rotated.x - -1.0).abs() < EPSILON);
        assert!(rotated.y.abs() < EPSILON);
        assert!(rotated.z.abs() < EPSILON);
        assert!(rotated.w.abs() < EPSILON);
    }

    #[test]
    fn test_rotation_quarter_turn_about_y() {
        let m = Mat4::rotation(PI / 2.0, Vec3::Y);
        let rotated = m.transform(Vec4::from_vec3(Vec3::X, 1.0)).truncate();
        assert_vec3_near(rotated, Vec3::new(0.0, 0.0, -1.0), 0.01);
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let unit = Mat4::rotation(1.3, Vec3::Y);
        let scaled = Mat4::rotation(1.3, Vec3::new(0.0, 42.0, 0.0));
        for j in 0..4 {
            for i in 0..4 {
                assert!((unit.cols[j][i] - scaled.cols[j][i]).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_perspective_produces_positive_w() {
        let m = Mat4::perspective(PI / 3.0, 1.0, 0.1, 100.0);
        let clip = m.transform(Vec4::new(0.0, 0.0, -1.0, 1.0));

        assert!(clip.x.is_finite());
        assert!(clip.y.is_finite());
        assert!(clip.z.is_finite());
        assert!(clip.w > 0.0);
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let m = Mat4::translation(0.0, 0.0, -3.0);
        let point = m.transform(Vec4::new(1.0, 2.0, 0.0, 1.0));
        assert_eq!(point, Vec4::new(1.0, 2.0, -3.0, 1.0));

        let direction = m.transform(Vec4::new(1.0, 2.0, 0.0, 0.0));
        assert_eq!(direction, Vec4::new(1.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_matrix_multiply_identity() {
        let m = Mat4::rotation(0.7, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn test_matrix_multiply_composes_right_to_left() {
        // Translate then rotate: the rotation must see the translated point.
        let rotate = Mat4::rotation(PI / 2.0, Vec3::Y);
        let translate = Mat4::translation(0.0, 0.0, -1.0);
        let composed = rotate * translate;

        let out = composed.transform(Vec4::new(0.0, 0.0, 0.0, 1.0)).truncate();
        assert_vec3_near(out, Vec3::new(-1.0, 0.0, 0.0), 0.01);
    }
}
