//! Point lattice generation.
//!
//! The lattice is the only geometry in the viewer: a regular N x N x N grid
//! of points generated once at startup and uploaded to the GPU verbatim.

use crate::error::{LatticeError, LatticeResult};
use crate::math::Vec3;

/// A static regular 3D grid of sample points.
///
/// Point count and spacing are fixed at construction time and never change;
/// the renderer holds a read-only view of the points for its one-time
/// vertex buffer upload.
#[derive(Debug, Clone)]
pub struct PointLattice {
    /// Generated points, x-outer / y-middle / z-inner order.
    points: Vec<Vec3>,
    /// Samples along each axis.
    samples_per_axis: u32,
    /// Distance between adjacent samples on one axis.
    spacing: f32,
}

impl PointLattice {
    /// Generates `samples_per_axis`^3 points spanning `[min, max]` on every
    /// axis, with uniform spacing `(max - min) / (N - 1)`.
    ///
    /// Deterministic and pure: identical parameters always produce the
    /// identical sequence. Iteration order is fixed x-outer, y-middle,
    /// z-inner.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::TooFewSamples`] if `samples_per_axis < 2`
    /// (a single sample would make the spacing divide by zero).
    pub fn generate(samples_per_axis: u32, min: f32, max: f32) -> LatticeResult<Self> {
        if samples_per_axis < 2 {
            return Err(LatticeError::TooFewSamples(samples_per_axis));
        }

        let n = samples_per_axis as usize;
        #[allow(clippy::cast_precision_loss)]
        let spacing = (max - min) / (samples_per_axis - 1) as f32;

        let mut points = Vec::with_capacity(n * n * n);
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    #[allow(clippy::cast_precision_loss)]
                    points.push(Vec3::new(
                        min + x as f32 * spacing,
                        min + y as f32 * spacing,
                        min + z as f32 * spacing,
                    ));
                }
            }
        }

        Ok(Self {
            points,
            samples_per_axis,
            spacing,
        })
    }

    /// Returns the generated points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Returns the total point count (`samples_per_axis`^3).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    /// Returns the samples along each axis.
    #[must_use]
    pub const fn samples_per_axis(&self) -> u32 {
        self.samples_per_axis
    }

    /// Returns the distance between adjacent samples on one axis.
    #[must_use]
    pub const fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Returns the points as raw bytes for the vertex buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_point_near(p: Vec3, expected: Vec3) {
        assert!((p.x - expected.x).abs() < EPSILON, "{p:?} vs {expected:?}");
        assert!((p.y - expected.y).abs() < EPSILON, "{p:?} vs {expected:?}");
        assert!((p.z - expected.z).abs() < EPSILON, "{p:?} vs {expected:?}");
    }

    #[test]
    fn test_generate_produces_n_cubed_points() {
        let lattice = PointLattice::generate(10, -0.7, 0.7).unwrap();
        assert_eq!(lattice.point_count(), 1000);
        assert_eq!(lattice.points().len(), 1000);
    }

    #[test]
    fn test_generate_corner_points() {
        let lattice = PointLattice::generate(10, -0.7, 0.7).unwrap();

        // Grid index (0, 0, 0) is the first point; (9, 9, 9) is the last.
        assert_point_near(lattice.points()[0], Vec3::new(-0.7, -0.7, -0.7));
        assert_point_near(lattice.points()[999], Vec3::new(0.7, 0.7, 0.7));
    }

    #[test]
    fn test_generate_spacing() {
        let lattice = PointLattice::generate(10, -0.7, 0.7).unwrap();
        assert!((lattice.spacing() - 1.4 / 9.0).abs() < EPSILON);

        // Adjacent samples on the z axis (innermost) sit spacing apart.
        let step = lattice.points()[1].z - lattice.points()[0].z;
        assert!((step - lattice.spacing()).abs() < EPSILON);
    }

    #[test]
    fn test_generate_axis_order_is_x_outer_z_inner() {
        let lattice = PointLattice::generate(3, 0.0, 2.0).unwrap();
        let points = lattice.points();

        // z varies fastest...
        assert_point_near(points[0], Vec3::new(0.0, 0.0, 0.0));
        assert_point_near(points[1], Vec3::new(0.0, 0.0, 1.0));
        // ...then y...
        assert_point_near(points[3], Vec3::new(0.0, 1.0, 0.0));
        // ...then x.
        assert_point_near(points[9], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = PointLattice::generate(10, -0.7, 0.7).unwrap();
        let b = PointLattice::generate(10, -0.7, 0.7).unwrap();
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_generate_rejects_single_sample() {
        assert_eq!(
            PointLattice::generate(1, -0.7, 0.7).unwrap_err(),
            LatticeError::TooFewSamples(1)
        );
        assert_eq!(
            PointLattice::generate(0, -0.7, 0.7).unwrap_err(),
            LatticeError::TooFewSamples(0)
        );
    }

    #[test]
    fn test_as_bytes_is_tightly_packed() {
        let lattice = PointLattice::generate(2, 0.0, 1.0).unwrap();
        assert_eq!(lattice.as_bytes().len(), 8 * 12); // 8 points * 3 * 4 bytes
    }
}
