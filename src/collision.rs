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

use cgmath::{InnerSpace, Point3, Vector3, Zero};

use crate::geom::{point_in_box, Plane, DEPTH_EPSILON};
use crate::physics::RigidBody;

/// How far a body's collision query got.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionState {
    /// No contact found for the attempted step.
    None,
    /// A vertex is touching a surface while moving into it; the step can
    /// be kept once an impulse is applied.
    Colliding,
    /// A vertex ended up inside a surface; the step has to be retried over
    /// a shorter interval.
    Penetrating,
}

/// The most recent query result for a body, kept on the body so the
/// resolver can consume it.
#[derive(Copy, Clone, Debug)]
pub struct Collision {
    pub state: CollisionState,
    pub normal: Vector3<f32>,
    pub contact: Point3<f32>,
}

impl Default for Collision {
    fn default() -> Collision {
        Collision {
            state: CollisionState::None,
            normal: Vector3::zero(),
            contact: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

impl RigidBody {
    /// Classify this body against the floor plane.
    ///
    /// Vertices are scanned in corner order and the first hit wins: below
    /// the tolerance band is `Penetrating`; within the band and still
    /// approaching the floor is `Colliding` with that vertex as the
    /// contact point.
    pub fn check_floor(&mut self) {
        let floor = Plane::floor();

        self.collision.state = CollisionState::None;

        for i in 0..self.verts.len() {
            let vert = self.verts[i];
            let projection = floor.signed_distance(vert);

            if projection < -DEPTH_EPSILON {
                self.collision.state = CollisionState::Penetrating;
                return;
            } else if projection < DEPTH_EPSILON {
                // Resting contact only counts while the vertex still moves
                // into the floor.
                let offset = vert - self.x;
                let velocity = self.v + self.omega.cross(offset);
                if floor.n.dot(velocity) < 0.0 {
                    self.collision.state = CollisionState::Colliding;
                    self.collision.normal = floor.n;
                    self.collision.contact = vert;
                    return;
                }
            }
        }
    }

    /// Test this body's vertices against another box, then the other box's
    /// vertices against this one.
    ///
    /// The first vertex found inside wins and the scan stops. A hit
    /// records the contact with a normal pointing away from `other` and
    /// immediately nudges this body out along it, so overlap never
    /// outlives the query that saw it.
    pub fn check_body(&mut self, other: &RigidBody) {
        for i in 0..self.verts.len() {
            let vert = self.verts[i];
            if let Some(hit) = point_in_box(&other.verts, vert) {
                self.collision.state = CollisionState::Colliding;
                self.collision.normal = hit.normal;
                self.collision.contact = vert;
                self.x += hit.normal * -hit.depth;
                return;
            }
        }

        for vert in other.verts.iter() {
            if let Some(hit) = point_in_box(&self.verts, *vert) {
                // The face is ours, so the outward direction flips.
                self.collision.state = CollisionState::Colliding;
                self.collision.normal = -hit.normal;
                self.collision.contact = *vert;
                self.x += self.collision.normal * -hit.depth;
                return;
            }
        }
    }
}
