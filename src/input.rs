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

/// How a boolean level changed between two samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Edge {
    /// Low on the previous sample, high now.
    pub pressed: bool,
    /// High on the previous sample, low now.
    pub released: bool,
    /// High on both samples.
    pub held: bool,
}

impl Edge {
    /// Classify the transition from `prev` to `current`.
    pub fn between(prev: bool, current: bool) -> Edge {
        Edge {
            pressed: current && !prev,
            released: !current && prev,
            held: current && prev,
        }
    }
}

/// Tracks one boolean level across frames so one-shot actions fire on
/// the rising edge only.
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeDetector {
    prev: bool,
}

impl EdgeDetector {
    /// Feed this frame's level and classify it against the last one.
    pub fn update(&mut self, current: bool) -> Edge {
        let edge = Edge::between(self.prev, current);
        self.prev = current;
        edge
    }
}

/// Control levels sampled once per frame by the host. Held keys stay
/// `true` for as long as they are down.
#[derive(Copy, Clone, Debug, Default)]
pub struct Signals {
    /// Throw the dice again.
    pub reroll: bool,
    /// One more die on the next re-roll.
    pub grow: bool,
    /// One fewer die on the next re-roll.
    pub shrink: bool,
    /// Host wants to shut down.
    pub quit: bool,
}

#[cfg(test)]
mod tests {
    mod input {
        use crate::input::*;

        #[test]
        fn test_edge_classification() {
            assert_eq!(
                Edge::between(false, true),
                Edge { pressed: true, released: false, held: false }
            );
            assert_eq!(
                Edge::between(true, false),
                Edge { pressed: false, released: true, held: false }
            );
            assert_eq!(
                Edge::between(true, true),
                Edge { pressed: false, released: false, held: true }
            );
            assert_eq!(Edge::between(false, false), Edge::default());
        }

        #[test]
        fn test_held_key_fires_once() {
            let mut detector = EdgeDetector::default();
            let samples = [true, true, true, false, true];
            let presses = samples
                .iter()
                .filter(|&&level| detector.update(level).pressed)
                .count();
            assert_eq!(presses, 2);
        }
    }
}
