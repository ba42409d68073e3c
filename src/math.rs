// Copyright 2026 The tumble developers. This file is part of tumble.
//
// tumble is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// tumble is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with tumble. If not, see <http://www.gnu.org/licenses/>.

use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix3, Matrix4, Point3, Vector3};

/// Normalize a vector, returning it untouched when its magnitude is zero.
pub fn normalize_safe(v: Vector3<f32>) -> Vector3<f32> {
    let magnitude2 = v.magnitude2();
    if magnitude2 == 0.0 {
        v
    } else {
        v / magnitude2.sqrt()
    }
}

/// The skew-symmetric matrix of a vector: `skew(v) * u == v.cross(u)`.
pub fn skew(v: Vector3<f32>) -> Matrix3<f32> {
    // cgmath matrices take their elements in column-major order.
    Matrix3::new(
         0.0,  v.z, -v.y,
        -v.z,  0.0,  v.x,
         v.y, -v.x,  0.0,
    )
}

/// Re-orthonormalize a rotation matrix with one Gram-Schmidt pass over its
/// columns.
///
/// Integrating an angular velocity drifts an orientation away from a pure
/// rotation; running this after every update keeps the basis orthogonal
/// and unit length.
pub fn orthonormalize(m: Matrix3<f32>) -> Matrix3<f32> {
    let x = normalize_safe(m.x);
    let z = normalize_safe(x.cross(m.y));
    let y = normalize_safe(z.cross(x));
    Matrix3::from_cols(x, y, z)
}

/// Rotation from Euler angles in degrees, composed yaw * pitch * roll, so
/// roll is applied first.
pub fn from_euler_deg(angles: Vector3<f32>) -> Matrix3<f32> {
    Matrix3::from_angle_y(Deg(angles.y))
        * Matrix3::from_angle_x(Deg(angles.x))
        * Matrix3::from_angle_z(Deg(angles.z))
}

/// Homogeneous model matrix for a pose: the rotation fills the upper-left
/// 3x3 and the position the fourth column, mapping `world = m * local`
/// with column vectors.
pub fn pose_matrix(rot: Matrix3<f32>, x: Point3<f32>) -> Matrix4<f32> {
    Matrix4::from_cols(
        rot.x.extend(0.0),
        rot.y.extend(0.0),
        rot.z.extend(0.0),
        x.to_vec().extend(1.0),
    )
}

#[cfg(test)]
mod tests {
    mod math {
        use approx::assert_relative_eq;
        use cgmath::{InnerSpace, Point3, SquareMatrix, Vector3, Vector4, Zero};

        use crate::math::*;

        #[test]
        fn test_normalize_safe() {
            let v = normalize_safe(Vector3::new(3.0, 0.0, 4.0));
            assert_relative_eq!(v, Vector3::new(0.6, 0.0, 0.8), epsilon = 1.0e-6);

            // Zero vectors come back unchanged instead of going NaN.
            assert_eq!(normalize_safe(Vector3::zero()), Vector3::zero());
        }

        #[test]
        fn test_skew_matches_cross() {
            let v = Vector3::new(1.0, -2.0, 3.0);
            let u = Vector3::new(-4.0, 5.0, 0.5);
            assert_relative_eq!(skew(v) * u, v.cross(u), epsilon = 1.0e-6);
            assert_relative_eq!(skew(u) * v, u.cross(v), epsilon = 1.0e-6);
        }

        #[test]
        fn test_orthonormalize_repairs_drift() {
            let mut drifted = from_euler_deg(Vector3::new(10.0, 20.0, 30.0));
            drifted.x += Vector3::new(0.05, -0.02, 0.01);
            drifted.y.z += 0.04;

            let m = orthonormalize(drifted);
            for i in 0..3 {
                assert_relative_eq!(m[i].magnitude(), 1.0, epsilon = 1.0e-6);
                for j in (i + 1)..3 {
                    assert_relative_eq!(m[i].dot(m[j]), 0.0, epsilon = 1.0e-6);
                }
            }
            // Still a proper rotation, not a reflection.
            assert_relative_eq!(m.determinant(), 1.0, epsilon = 1.0e-5);
            // Already-orthonormal input is a fixed point.
            let again = orthonormalize(m);
            assert_relative_eq!(again.x, m.x, epsilon = 1.0e-6);
            assert_relative_eq!(again.y, m.y, epsilon = 1.0e-6);
            assert_relative_eq!(again.z, m.z, epsilon = 1.0e-6);
        }

        #[test]
        fn test_from_euler_deg_composition() {
            // 90 degrees of yaw carries +X onto -Z.
            let yaw = from_euler_deg(Vector3::new(0.0, 90.0, 0.0));
            assert_relative_eq!(yaw * Vector3::unit_x(), -Vector3::unit_z(), epsilon = 1.0e-6);

            // Roll spins first, yaw last: +X rolls onto +Y and stays there.
            let both = from_euler_deg(Vector3::new(0.0, 90.0, 90.0));
            assert_relative_eq!(both * Vector3::unit_x(), Vector3::unit_y(), epsilon = 1.0e-6);
        }

        #[test]
        fn test_pose_matrix_convention() {
            let rot = from_euler_deg(Vector3::new(15.0, 45.0, -30.0));
            let m = pose_matrix(rot, Point3::new(1.0, 2.0, 3.0));

            // The local origin lands on the body position.
            assert_relative_eq!(
                m * Vector4::new(0.0, 0.0, 0.0, 1.0),
                Vector4::new(1.0, 2.0, 3.0, 1.0),
                epsilon = 1.0e-6
            );
            // Directions pass through the rotation alone.
            assert_relative_eq!(
                m * Vector4::new(1.0, 0.0, 0.0, 0.0),
                (rot * Vector3::unit_x()).extend(0.0),
                epsilon = 1.0e-6
            );
        }
    }
}
