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

use cgmath::{InnerSpace, Matrix, Matrix3, Point3, SquareMatrix, Vector3, Zero};

use crate::collision::Collision;
use crate::geom::{box_corners, point_in_box, Plane};
use crate::math::{orthonormalize, skew};

/// Gravitational acceleration, applied along -Y.
pub const GRAVITY: f32 = 20.0;
/// Drag opposing linear velocity.
pub const LINEAR_DAMPING: f32 = 0.1;
/// Drag opposing angular velocity.
pub const ANGULAR_DAMPING: f32 = 0.3;
/// Per-step retention of lateral force and velocity while on the floor.
pub const HORIZONTAL_FRICTION: f32 = 0.8;
/// Per-step retention of vertical force and velocity while on the floor.
pub const VERTICAL_FRICTION: f32 = 0.04;
/// Per-step retention of yaw torque and spin while on the floor.
pub const ANGULAR_FRICTION: f32 = 0.08;
/// Coefficient of restitution every body is created with.
pub const BOUNCE_FACTOR: f32 = 0.6;
/// Mass is density times volume: eight octants of hx * hy * hz.
pub const MASS_MULTIPLIER: f32 = 8.0;
/// Slack on the resting-height test that gates floor friction.
pub const CONTACT_SLACK: f32 = 0.003;

/// A box-shaped rigid body.
///
/// The pose is a position plus an orthonormal rotation matrix;
/// `body_verts` holds the corners in body space and `verts` their
/// world-space images, refreshed by `update_vertices`. The angular state
/// integrates momentum, not velocity: `omega` is re-derived from
/// `angular_m` through the world inertia tensor every step, so impulses
/// and the tumbling of a tilted box both fall out of the same bookkeeping.
#[derive(Copy, Clone, Debug)]
pub struct RigidBody {
    pub mass: f32,
    pub restitution: f32,
    /// Full box extents, not half.
    pub dims: Vector3<f32>,
    /// Inverse inertia tensor in body space.
    pub inv_moment_body: Matrix3<f32>,
    /// Inverse inertia tensor in world space; valid after `integrate`.
    pub inv_moment: Matrix3<f32>,
    pub x: Point3<f32>,
    pub rot: Matrix3<f32>,
    pub v: Vector3<f32>,
    pub omega: Vector3<f32>,
    pub angular_m: Vector3<f32>,
    pub force: Vector3<f32>,
    pub torque: Vector3<f32>,
    /// Corners in body space.
    pub body_verts: [Vector3<f32>; 8],
    /// Corners in world space.
    pub verts: [Point3<f32>; 8],
    /// Result of the most recent collision query.
    pub collision: Collision,
}

impl RigidBody {
    /// Construct a body at rest, centered at `x`.
    ///
    /// Mass is density times volume and the inverse inertia tensor is the
    /// analytic one for a solid box, diagonal in body space.
    pub fn new(x: Point3<f32>, dims: Vector3<f32>, density: f32) -> RigidBody {
        let half = dims / 2.0;
        let mass = MASS_MULTIPLIER * density * half.x * half.y * half.z;
        let inv_moment_body = Matrix3::new(
            3.0 / (mass * (half.y * half.y + half.z * half.z)), 0.0, 0.0,
            0.0, 3.0 / (mass * (half.x * half.x + half.z * half.z)), 0.0,
            0.0, 0.0, 3.0 / (mass * (half.x * half.x + half.y * half.y)),
        );

        let mut body = RigidBody {
            mass,
            restitution: BOUNCE_FACTOR,
            dims,
            inv_moment_body,
            inv_moment: Matrix3::zero(),
            x,
            rot: Matrix3::identity(),
            v: Vector3::zero(),
            omega: Vector3::zero(),
            angular_m: Vector3::zero(),
            force: Vector3::zero(),
            torque: Vector3::zero(),
            body_verts: box_corners(half),
            verts: [Point3::new(0.0, 0.0, 0.0); 8],
            collision: Collision::default(),
        };
        body.update_vertices();
        body
    }

    /// Refresh the world-space corners from the current pose.
    pub fn update_vertices(&mut self) {
        for i in 0..self.verts.len() {
            self.verts[i] = self.x + self.rot * self.body_verts[i];
        }
    }

    /// Accumulate this step's forces: gravity, drag against both
    /// velocities, and floor friction once the body sits low enough to be
    /// resting on some face.
    pub fn apply_forces(&mut self) {
        self.force = Vector3::zero();
        self.torque = Vector3::zero();

        self.force.y -= GRAVITY * self.mass;

        self.force += self.v * -LINEAR_DAMPING;
        self.torque += self.omega * -ANGULAR_DAMPING;

        // Low enough that some face can be resting on the floor.
        let radius = self.dims.x.min(self.dims.y).min(self.dims.z) / 2.0;
        if self.x.y <= radius + CONTACT_SLACK {
            self.force.x *= HORIZONTAL_FRICTION;
            self.force.z *= HORIZONTAL_FRICTION;
            self.force.y *= VERTICAL_FRICTION;

            self.v.x *= HORIZONTAL_FRICTION;
            self.v.z *= HORIZONTAL_FRICTION;
            self.v.y *= VERTICAL_FRICTION;

            // Only yaw spin is damped by contact.
            self.torque.y *= ANGULAR_FRICTION;
            self.omega.y *= ANGULAR_FRICTION;
        }
    }

    /// Advance the body by `dt` with one Euler step.
    ///
    /// The orientation derivative is `skew(omega) * rot`, re-orthonormalized
    /// after the update; angular velocity is then re-derived from the
    /// angular momentum through the freshly oriented inertia tensor. All
    /// fields are computed from the pre-step state and committed together.
    pub fn integrate(&mut self, dt: f32) {
        let x = self.x + self.v * dt;
        let rot = orthonormalize(self.rot + skew(self.omega) * self.rot * dt);
        let v = self.v + self.force * (dt / self.mass);
        let angular_m = self.angular_m + self.torque * dt;
        let inv_moment = rot * self.inv_moment_body * rot.transpose();
        let omega = inv_moment * angular_m;

        self.x = x;
        self.rot = rot;
        self.v = v;
        self.angular_m = angular_m;
        self.inv_moment = inv_moment;
        self.omega = omega;
    }

    /// Apply an impulse answering the contact recorded by the last query.
    ///
    /// Single-point impulse: the velocity of the contact point is
    /// reflected against the contact normal, scaled by restitution, and
    /// fed back through both the mass and the inertia tensor.
    pub fn resolve_collision(&mut self) {
        let offset = self.collision.contact - self.x;
        let velocity = self.v + self.omega.cross(offset);
        let normal = self.collision.normal;

        let numerator = -(1.0 + self.restitution) * velocity.dot(normal);
        let denominator = 1.0 / self.mass
            + (self.inv_moment * offset.cross(normal)).cross(offset).dot(normal);

        let impulse = normal * (numerator / denominator);
        self.v += impulse / self.mass;
        self.angular_m += offset.cross(impulse);
        self.omega = self.inv_moment * self.angular_m;
    }

    /// Translate the body straight up until no vertex is below the floor.
    ///
    /// Works from the vertices as last computed; callers refresh them
    /// between passes.
    pub fn move_out_of_floor(&mut self) {
        let floor = Plane::floor();

        let mut lowest = f32::INFINITY;
        for vert in self.verts.iter() {
            lowest = lowest.min(floor.signed_distance(*vert));
        }

        if lowest < 0.0 {
            self.x += floor.n * -lowest;
        }
    }

    /// Push this body out of another one. Only this body moves.
    ///
    /// Centers closer than half the smallest extent defeat the face tests,
    /// so those are first separated outright along the line between them,
    /// straight up if the centers coincide. Remaining overlap is walked
    /// vertex by vertex out along the face normals, from the vertices as
    /// last computed; callers refresh them between passes.
    pub fn move_out_of_body(&mut self, other: &RigidBody) {
        let radius = self.dims.x.min(self.dims.y).min(self.dims.z);

        let delta = self.x - other.x;
        let distance = delta.magnitude();
        if distance < radius / 2.0 {
            let direction = if distance > 0.0 {
                delta / distance
            } else {
                Vector3::unit_y()
            };
            self.x += direction * (radius - distance);
        }

        for i in 0..self.verts.len() {
            if let Some(hit) = point_in_box(&other.verts, self.verts[i]) {
                self.x += hit.normal * -hit.depth;
            }
        }
        for vert in other.verts.iter() {
            if let Some(hit) = point_in_box(&self.verts, *vert) {
                self.x += -hit.normal * -hit.depth;
            }
        }
    }
}
