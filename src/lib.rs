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

//! A small rigid-body simulation of boxes tumbling onto a floor.
//!
//! # Simulation overview
//!
//! A [`Scene`] owns a handful of box-shaped rigid bodies falling under
//! gravity toward the plane y = 0. Bodies are integrated explicitly and
//! collide with the floor and with each other at their vertices. A touch
//! is answered with a restitution impulse; an overlap rejects the step,
//! and the scene bisects the time slice until it lands on the moment of
//! contact. Whatever overlap survives a frame is removed geometrically,
//! by iteratively shoving bodies out of the floor and out of one another.
//!
//! # Driving a scene
//!
//! The host samples its inputs into [`Signals`] and calls
//! [`Scene::step`] once per frame; the returned [`StepStats`] says how
//! eventful the frame was. [`Scene::snapshot`] copies out a render pose
//! per body, and [`OrbitCamera`] provides the matching view: a camera
//! circling the dice pit on held input.

pub use cgmath;

mod camera;
pub use camera::*;

mod collision;
pub use collision::*;

mod geom;
pub use geom::*;

mod input;
pub use input::*;

mod math;
pub use math::*;

mod physics;
pub use physics::*;

mod scene;
pub use scene::*;
