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

//! Headless dice drop: throws a set of dice, re-rolls once mid-run, and
//! prints every frame in which the solver had work to do.

use tumble::{OrbitCamera, Scene, SceneConfig, Signals};

fn main() {
    let mut scene = Scene::with_seed(SceneConfig::default(), 0xD1CE);
    let mut camera = OrbitCamera::default();
    let dt = 1.0 / 60.0;

    for frame in 0..600u32 {
        let signals = Signals {
            // Hold the re-roll key for half a second mid-run; the edge
            // detector turns that into a single throw.
            reroll: (120..150).contains(&frame),
            ..Signals::default()
        };

        let stats = scene.step(dt, &signals);
        camera.update(1.0, 0.0, dt);

        if stats.collisions > 0 || stats.penetrations > 0 {
            println!(
                "frame {:3}  collisions={}  penetrations={}  subdivisions={}  forced={}",
                frame, stats.collisions, stats.penetrations, stats.subdivisions, stats.forced
            );
        }
    }

    println!("\nsettled poses:");
    for pose in scene.snapshot() {
        println!(
            "  side {:.2} at ({:+.3}, {:+.3}, {:+.3})",
            pose.dims.x, pose.position.x, pose.position.y, pose.position.z
        );
    }
    println!(
        "camera ended at ({:+.2}, {:+.2}, {:+.2})",
        camera.position.x, camera.position.y, camera.position.z
    );
}
