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

use cgmath::{Matrix3, Matrix4, Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::collision::CollisionState;
use crate::input::{EdgeDetector, Signals};
use crate::math::{from_euler_deg, pose_matrix};
use crate::physics::RigidBody;

/// Upper bound on simultaneously simulated bodies.
pub const MAX_BODIES: usize = 10;
/// Time bisections allowed per body per frame before a penetrating step
/// is forced through.
pub const MAX_TIME_DIVISIONS: u32 = 20;
/// Rounds of move-out corrections in one penetration pass.
pub const PENETRATION_PASSES: usize = 10;

/// Spawn parameters for a scene. The defaults reproduce the classic dice
/// drop: eight cubes scattered over the floor from several units up.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Bodies created at construction and used by the first re-roll.
    pub initial_count: usize,
    /// Half-range of spawn positions on x.
    pub spread_x: f32,
    /// Half-range of spawn positions on z.
    pub spread_z: f32,
    /// Inclusive spawn height range.
    pub drop_height: (f32, f32),
    /// Inclusive cube side length range.
    pub side: (f32, f32),
    /// Material density shared by every body.
    pub density: f32,
    /// Upper bound of the random tilt, in degrees per Euler axis.
    pub max_tilt: f32,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig {
            initial_count: 8,
            spread_x: 1.2,
            spread_z: 1.0,
            drop_height: (5.0, 20.0),
            side: (0.5, 1.0),
            density: 3.0,
            max_tilt: 90.0,
        }
    }
}

/// Counters describing what one call to `Scene::step` had to do.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepStats {
    /// Contacts answered with an impulse.
    pub collisions: u32,
    /// Attempted steps rejected because a body ended up inside something.
    pub penetrations: u32,
    /// Time bisections performed while searching for contact times.
    pub subdivisions: u32,
    /// Penetrating steps committed anyway because the bisection budget
    /// ran out.
    pub forced: u32,
}

/// Render-facing pose of one body.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct BodyPose {
    pub position: Point3<f32>,
    pub orientation: Matrix3<f32>,
    /// Full box extents, for scaling a unit-cube mesh.
    pub dims: Vector3<f32>,
}

impl BodyPose {
    /// Model matrix carrying cube-local points into world space.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        pose_matrix(self.orientation, self.position)
    }
}

/// An arena of rigid boxes above a floor plane.
///
/// The scene owns its bodies in place. `step` advances every body through
/// one frame, re-rolling or resizing the set first when the frame's
/// control signals ask for it, and `snapshot` copies out render poses.
pub struct Scene {
    pub bodies: SmallVec<[RigidBody; MAX_BODIES]>,
    /// Body count the next re-roll will use.
    pub pending: usize,
    pub config: SceneConfig,
    rng: StdRng,
    reroll: EdgeDetector,
    grow: EdgeDetector,
    shrink: EdgeDetector,
}

impl Scene {
    /// Create a scene with an entropy-seeded spawn sequence.
    pub fn new(config: SceneConfig) -> Scene {
        Scene::from_rng(config, StdRng::from_entropy())
    }

    /// Create a scene whose spawns are reproducible from `seed`.
    pub fn with_seed(config: SceneConfig, seed: u64) -> Scene {
        Scene::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: SceneConfig, rng: StdRng) -> Scene {
        let mut scene = Scene {
            bodies: SmallVec::new(),
            pending: config.initial_count.clamp(1, MAX_BODIES),
            config,
            rng,
            reroll: EdgeDetector::default(),
            grow: EdgeDetector::default(),
            shrink: EdgeDetector::default(),
        };
        scene.spawn_bodies();
        scene
    }

    /// Replace the arena with `pending` freshly randomized bodies: cubes
    /// of a random side, scattered over the floor, tilted on every axis.
    pub fn spawn_bodies(&mut self) {
        let config = self.config;
        self.bodies.clear();

        for _ in 0..self.pending {
            let side = self.rng.gen_range(config.side.0..=config.side.1);
            let position = Point3::new(
                self.rng.gen_range(-config.spread_x..=config.spread_x),
                self.rng.gen_range(config.drop_height.0..=config.drop_height.1),
                self.rng.gen_range(-config.spread_z..=config.spread_z),
            );
            let tilt = Vector3::new(
                self.rng.gen_range(0.0..=config.max_tilt),
                self.rng.gen_range(0.0..=config.max_tilt),
                self.rng.gen_range(0.0..=config.max_tilt),
            );

            let mut body = RigidBody::new(position, Vector3::new(side, side, side), config.density);
            body.rot = from_euler_deg(tilt);
            body.update_vertices();
            self.bodies.push(body);
        }
    }

    /// Advance the whole scene by `dt` seconds.
    ///
    /// Scene edits happen first, on the rising edge of their signals; then
    /// every body is stepped independently through the frame's time
    /// budget.
    pub fn step(&mut self, dt: f32, signals: &Signals) -> StepStats {
        let mut stats = StepStats::default();

        self.handle_signals(signals);

        for i in 0..self.bodies.len() {
            self.step_body(i, dt, &mut stats);
        }

        stats
    }

    /// Copy out the render pose of every body.
    pub fn snapshot(&self) -> SmallVec<[BodyPose; MAX_BODIES]> {
        self.bodies
            .iter()
            .map(|body| BodyPose {
                position: body.x,
                orientation: body.rot,
                dims: body.dims,
            })
            .collect()
    }

    fn handle_signals(&mut self, signals: &Signals) {
        if self.reroll.update(signals.reroll).pressed {
            self.spawn_bodies();
        }
        if self.grow.update(signals.grow).pressed && self.pending < MAX_BODIES {
            self.pending += 1;
        }
        if self.shrink.update(signals.shrink).pressed && self.pending > 1 {
            self.pending -= 1;
        }
    }

    /// Advance body `i` through `dt`, bisecting time around contacts.
    fn step_body(&mut self, i: usize, dt: f32, stats: &mut StepStats) {
        let mut current = 0.0;
        let mut target = dt;
        let mut divisions = 0;

        // Clear any overlap left from the previous frame before moving.
        let mut body = self.bodies[i];
        self.resolve_penetration(&mut body, i);
        self.bodies[i] = body;

        while current < dt {
            // Step a copy so a bad state can be thrown away.
            let mut body = self.bodies[i];

            body.apply_forces();
            body.integrate(target - current);
            body.update_vertices();

            body.check_floor();
            if body.collision.state == CollisionState::None {
                self.check_body_collisions(&mut body, i);
            }

            match body.collision.state {
                CollisionState::Penetrating if divisions < MAX_TIME_DIVISIONS => {
                    // Bisect toward the moment of contact and retry.
                    target = (current + target) / 2.0;
                    divisions += 1;
                    stats.penetrations += 1;
                    stats.subdivisions += 1;
                    continue;
                }
                CollisionState::Penetrating => {
                    // Budget exhausted: keep the step instead of dropping
                    // the rest of the frame, and correct it back to a
                    // legal pose.
                    stats.penetrations += 1;
                    stats.forced += 1;
                    self.resolve_penetration(&mut body, i);
                }
                CollisionState::Colliding => {
                    stats.collisions += 1;
                    body.resolve_collision();
                    self.resolve_penetration(&mut body, i);
                }
                CollisionState::None => {}
            }

            // Successful step: commit and move forward in time.
            current = target;
            target = dt;
            self.bodies[i] = body;
        }
    }

    /// Run body-vs-body queries for a working copy of body `skip`,
    /// stopping at the first contact. Arena order decides who is found
    /// first.
    fn check_body_collisions(&self, body: &mut RigidBody, skip: usize) {
        for (j, other) in self.bodies.iter().enumerate() {
            if body.collision.state != CollisionState::None {
                break;
            }
            if j != skip {
                body.check_body(other);
            }
        }
    }

    /// Iteratively shove a body out of the floor and out of every other
    /// body, refreshing its vertices between moves.
    fn resolve_penetration(&self, body: &mut RigidBody, skip: usize) {
        for _ in 0..PENETRATION_PASSES {
            body.update_vertices();
            body.move_out_of_floor();

            for (j, other) in self.bodies.iter().enumerate() {
                if j == skip {
                    continue;
                }
                body.update_vertices();
                body.move_out_of_body(other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    mod scene {
        use approx::assert_relative_eq;
        use cgmath::{EuclideanSpace, InnerSpace, Vector3};

        use crate::input::Signals;
        use crate::scene::*;

        const DT: f32 = 1.0 / 60.0;

        /// A deterministic single-cube setup: unit die, dead center, five
        /// units up, no tilt.
        fn one_cube_config() -> SceneConfig {
            SceneConfig {
                initial_count: 1,
                spread_x: 0.0,
                spread_z: 0.0,
                drop_height: (5.0, 5.0),
                side: (1.0, 1.0),
                density: 3.0,
                max_tilt: 0.0,
            }
        }

        #[test]
        fn test_initial_spawn_respects_config() {
            let scene = Scene::with_seed(SceneConfig::default(), 7);
            assert_eq!(scene.bodies.len(), 8);
            for body in scene.bodies.iter() {
                assert!(body.x.y >= 5.0 && body.x.y <= 20.0);
                assert!(body.x.x.abs() <= 1.2);
                assert!(body.x.z.abs() <= 1.0);
                assert!(body.dims.x >= 0.5 && body.dims.x <= 1.0);
                // Dice are cubes.
                assert_eq!(body.dims.x, body.dims.y);
                assert_eq!(body.dims.x, body.dims.z);
            }
        }

        #[test]
        fn test_count_clamps_at_capacity() {
            let mut scene = Scene::with_seed(SceneConfig::default(), 1);
            let grow = Signals { grow: true, ..Signals::default() };
            let shrink = Signals { shrink: true, ..Signals::default() };
            let idle = Signals::default();

            for _ in 0..MAX_BODIES + 5 {
                scene.step(DT, &grow);
                scene.step(DT, &idle); // release so the edge re-arms
            }
            assert_eq!(scene.pending, MAX_BODIES);

            for _ in 0..MAX_BODIES + 5 {
                scene.step(DT, &shrink);
                scene.step(DT, &idle);
            }
            assert_eq!(scene.pending, 1);
        }

        #[test]
        fn test_held_reroll_fires_once() {
            let mut scene = Scene::with_seed(one_cube_config(), 3);
            let reroll = Signals { reroll: true, ..Signals::default() };

            // Let the die fall for a second, then press re-roll: it snaps
            // back to its spawn height.
            for _ in 0..60 {
                scene.step(DT, &Signals::default());
            }
            assert!(scene.bodies[0].x.y < 3.0);
            scene.step(DT, &reroll);
            assert!(scene.bodies[0].x.y > 4.9);

            // Still held on the next frame: no new spawn, the die just
            // keeps falling.
            let after_press = scene.bodies[0].x.y;
            scene.step(DT, &reroll);
            assert!(scene.bodies[0].x.y < after_press);
        }

        #[test]
        fn test_reroll_uses_pending_count() {
            let mut scene = Scene::with_seed(SceneConfig::default(), 5);
            let shrink = Signals { shrink: true, ..Signals::default() };
            let idle = Signals::default();

            // Count changes take effect on the next re-roll, not sooner.
            scene.step(DT, &shrink);
            assert_eq!(scene.bodies.len(), 8);
            assert_eq!(scene.pending, 7);

            scene.step(DT, &idle);
            scene.step(DT, &Signals { reroll: true, ..Signals::default() });
            assert_eq!(scene.bodies.len(), 7);
        }

        #[test]
        fn test_drop_settles_on_floor() {
            let mut scene = Scene::with_seed(one_cube_config(), 0);
            assert_relative_eq!(scene.bodies[0].x.y, 5.0, epsilon = 1.0e-5);

            let mut saw_collision = false;
            for _ in 0..600 {
                let stats = scene.step(DT, &Signals::default());
                saw_collision |= stats.collisions > 0;
            }

            // Ten seconds is plenty: the die is at rest on the floor.
            let body = &scene.bodies[0];
            assert!(saw_collision);
            assert_relative_eq!(body.x.y, 0.5, epsilon = 0.01);
            assert!(body.v.magnitude() < 0.05, "still moving at {:?}", body.v);
        }

        #[test]
        fn test_fast_fall_bisects_and_stays_above_floor() {
            let mut scene = Scene::with_seed(one_cube_config(), 0);
            scene.bodies[0].v = Vector3::new(0.0, -100.0, 0.0);

            // One oversized frame would tunnel 20 units through the floor
            // if the step were taken whole.
            let stats = scene.step(0.2, &Signals::default());
            assert!(stats.penetrations > 0);

            let mut body = scene.bodies[0];
            body.update_vertices();
            for vert in body.verts.iter() {
                assert!(vert.y >= -0.01, "vertex below the floor: {:?}", vert);
            }
        }

        #[test]
        fn test_zero_dt_is_a_no_op() {
            let mut scene = Scene::with_seed(one_cube_config(), 0);
            let before = scene.bodies[0].x;
            let stats = scene.step(0.0, &Signals::default());
            assert_eq!(scene.bodies[0].x, before);
            assert_eq!(stats.collisions, 0);
            assert_eq!(stats.penetrations, 0);
        }

        #[test]
        fn test_full_drop_run_stays_sane() {
            let mut scene = Scene::with_seed(SceneConfig::default(), 42);
            let mut total_collisions = 0;
            for _ in 0..900 {
                total_collisions += scene.step(DT, &Signals::default()).collisions;
            }
            assert!(total_collisions > 0);

            for body in scene.bodies.iter() {
                assert!(body.x.y.is_finite() && body.v.magnitude().is_finite());
                assert!(body.x.y < 25.0, "body climbed to {}", body.x.y);

                let mut body = *body;
                body.update_vertices();
                for vert in body.verts.iter() {
                    assert!(vert.y > -0.25, "vertex tunneled to {:?}", vert);
                }
            }
        }

        #[test]
        fn test_snapshot_matches_bodies() {
            let scene = Scene::with_seed(SceneConfig::default(), 9);
            let poses = scene.snapshot();
            assert_eq!(poses.len(), scene.bodies.len());

            for (pose, body) in poses.iter().zip(scene.bodies.iter()) {
                assert_eq!(pose.position, body.x);
                assert_eq!(pose.dims, body.dims);

                // The model matrix reproduces the pose.
                let m = pose.model_matrix();
                assert_relative_eq!(m.w.truncate(), body.x.to_vec(), epsilon = 1.0e-6);
                assert_relative_eq!(m.x.truncate(), body.rot.x, epsilon = 1.0e-6);
            }
        }

        #[test]
        fn test_config_round_trips_through_json() {
            let config = SceneConfig::default();
            let json = serde_json::to_string(&config).unwrap();
            let back: SceneConfig = serde_json::from_str(&json).unwrap();

            assert_eq!(back.initial_count, config.initial_count);
            assert_relative_eq!(back.spread_x, config.spread_x);
            assert_relative_eq!(back.drop_height.1, config.drop_height.1);
            assert_relative_eq!(back.max_tilt, config.max_tilt);
        }
    }
}
