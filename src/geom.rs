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

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::math::normalize_safe;

/// Band around a surface within which a vertex counts as touching it
/// rather than penetrating.
pub const DEPTH_EPSILON: f32 = 0.001;

/// Planes are a normal vector and a distance.
#[derive(Copy, Clone, Debug)]
pub struct Plane {
    pub n: Vector3<f32>,
    pub d: f32,
}

impl Plane {
    /// The floor every body falls onto: y = 0 with an upward normal.
    pub fn floor() -> Plane {
        Plane {
            n: Vector3::unit_y(),
            d: 0.0,
        }
    }

    /// Signed distance of a point from the plane; negative is behind the
    /// normal.
    pub fn signed_distance(&self, p: Point3<f32>) -> f32 {
        self.n.dot(p.to_vec()) - self.d
    }
}

/// The eight corners of a box with the given half extents, in the order
/// the face tables index them: the bottom ring first, then the top ring.
pub fn box_corners(half: Vector3<f32>) -> [Vector3<f32>; 8] {
    [
        Vector3::new(-half.x, -half.y,  half.z),
        Vector3::new(-half.x, -half.y, -half.z),
        Vector3::new( half.x, -half.y, -half.z),
        Vector3::new( half.x, -half.y,  half.z),
        Vector3::new(-half.x,  half.y,  half.z),
        Vector3::new( half.x,  half.y,  half.z),
        Vector3::new( half.x,  half.y, -half.z),
        Vector3::new(-half.x,  half.y, -half.z),
    ]
}

/// Corner index triples for the six faces of a box, wound so that each
/// triple's normal points out of the volume.
pub const FACES: [[usize; 3]; 6] = [
    [7, 6, 2], // front
    [5, 4, 0], // back
    [4, 5, 6], // top
    [1, 2, 3], // bottom
    [4, 7, 1], // left
    [6, 5, 3], // right
];

/// Unit normal of the plane through three corners taken in face-table
/// winding order.
pub fn face_normal(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Vector3<f32> {
    normalize_safe((b - a).cross(c - a))
}

/// Signed distance of a point from the plane through three corners;
/// positive is outside when the corners come from the face table.
pub fn plane_projection(
    p: Point3<f32>,
    a: Point3<f32>,
    b: Point3<f32>,
    c: Point3<f32>,
) -> f32 {
    (p - a).dot(face_normal(a, b, c))
}

/// A point found inside a box: the outward normal of the face closest to
/// it, and its signed distance from that face (always negative).
#[derive(Copy, Clone, Debug)]
pub struct Penetration {
    pub normal: Vector3<f32>,
    pub depth: f32,
}

/// Test a point against the box whose world-space corners are `verts`.
///
/// The point is inside only if it lies behind the plane of all six faces;
/// any face acting as a separating plane ends the scan. A hit reports the
/// shallowest face, the cheapest direction to push the point back out,
/// with the earliest face in the table winning ties.
pub fn point_in_box(verts: &[Point3<f32>; 8], p: Point3<f32>) -> Option<Penetration> {
    let mut depth = f32::NEG_INFINITY;
    let mut hit_face = 0;

    for (i, face) in FACES.iter().enumerate() {
        let projection = plane_projection(p, verts[face[0]], verts[face[1]], verts[face[2]]);
        if projection >= 0.0 {
            return None;
        }
        if projection > depth {
            depth = projection;
            hit_face = i;
        }
    }

    let face = FACES[hit_face];
    Some(Penetration {
        normal: face_normal(verts[face[0]], verts[face[1]], verts[face[2]]),
        depth,
    })
}
