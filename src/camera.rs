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

use cgmath::Point3;

/// A camera circling the dice pit, always aimed at `focus`.
#[derive(Copy, Clone, Debug)]
pub struct OrbitCamera {
    pub position: Point3<f32>,
    pub focus: Point3<f32>,
    /// Angular speed, in degrees per second of held input.
    pub speed: f32,
    pub orbit_radius: f32,
    /// Current angle around the y axis, in radians.
    pub orbit_angle: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for OrbitCamera {
    fn default() -> OrbitCamera {
        OrbitCamera {
            position: Point3::new(10.0, 3.0, 0.0),
            focus: Point3::new(0.0, 0.0, 0.0),
            speed: 80.0,
            orbit_radius: 10.0,
            orbit_angle: 0.0,
            min_y: 3.0,
            max_y: 10.0,
        }
    }
}

impl OrbitCamera {
    /// Steer by one frame. `orbit` and `lift` are input directions in
    /// -1..=1; zero leaves the corresponding axis untouched.
    pub fn update(&mut self, orbit: f32, lift: f32, dt: f32) {
        if orbit != 0.0 {
            self.orbit_angle += (orbit * self.speed * dt).to_radians();
            self.position.x = self.orbit_radius * self.orbit_angle.cos();
            self.position.z = self.orbit_radius * self.orbit_angle.sin();
        }
        if lift != 0.0 {
            let y = self.position.y + lift * self.speed * dt * 0.15;
            self.position.y = y.clamp(self.min_y, self.max_y);
        }
    }
}
