/*
solver.rs

Copyright 2025 The Mazewright authors

This file is part of Mazewright.

Mazewright is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazewright is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazewright. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Find all the paths through a grid.
//!
//! A solution starts on the first `a` endpoint, visits every square that is not a barrier, and
//! stops on the last `b` endpoint.
//! When the grid has several endpoint pairs, the path is made of consecutive segments: once the
//! path reaches `endpoint_n_b`, it continues from `endpoint_n+1_a`.
//!
//! The search states wait in a FIFO queue. Each state owns a copy of the grid, so expanding a
//! state never changes the others.

use log::debug;
use std::collections::VecDeque;
use std::time::Instant;

use super::formula::Variant;
use super::grid::{Direction, Grid};
use super::layout::Subgroup;
use super::path::Path;
use super::square::SquareKind;

/// What happens when the path enters a square.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Effect {
    /// The square is taken.
    Mark,

    /// Only the crossing axis of the bridge is taken.
    MarkAxis,

    /// The square and its partner are taken, and the path continues from the partner.
    Teleport,
}

/// Dispatch table: the squares that the path can enter in each variant.
///
/// Endpoints are not listed. They are handled the same way by all the variants.
fn effect(variant: Variant, kind: &SquareKind) -> Option<Effect> {
    match (variant, kind) {
        (_, SquareKind::Normal) => Some(Effect::Mark),
        (Variant::Bridge, SquareKind::Bridge { .. }) => Some(Effect::MarkAxis),
        (Variant::Tunnel, SquareKind::Tunnel { .. })
        | (Variant::Portal, SquareKind::Portal { .. }) => Some(Effect::Teleport),
        _ => None,
    }
}

/// Partial path and the state of the grid at the end of that path.
#[derive(Debug, Clone)]
struct SearchState {
    path: Path,
    grid: Grid,

    /// Direction of the last move. A bridge must be left in that direction.
    heading: Option<Direction>,

    /// Current endpoint pair (group 1 at index 0).
    segment: usize,
}

/// Result of moving one square from a search state.
enum Step {
    Pruned,
    Continue(SearchState),
    Solved(Path),
}

impl SearchState {
    fn new(grid: &Grid) -> Self {
        let mut path = Path::new(grid.size() + grid.size() / 2);
        path.push(grid.start());
        Self {
            path,
            grid: grid.clone(),
            heading: None,
            segment: 0,
        }
    }

    /// Directions the path can take from its current square.
    fn directions(&self) -> Vec<Direction> {
        let Some(current) = self.path.get_last() else {
            return Vec::new();
        };
        match (self.grid.square(current).kind, self.heading) {
            (SquareKind::Bridge { .. }, Some(heading)) => vec![heading],
            _ => Direction::ALL.to_vec(),
        }
    }

    /// Try to move one square in the given direction.
    fn step(&self, direction: Direction) -> Step {
        let Some(target) = self
            .path
            .get_last()
            .and_then(|current| self.grid.neighbor(current, direction))
        else {
            return Step::Pruned;
        };
        let kind: SquareKind = self.grid.square(target).kind;

        if let SquareKind::Endpoint { group, subgroup } = kind {
            if subgroup != Subgroup::B
                || group != self.segment + 1
                || self.grid.square(target).is_taken()
            {
                return Step::Pruned;
            }
            return self.reach_endpoint(target, direction);
        }

        let Some(effect) = effect(self.grid.variant(), &kind) else {
            return Step::Pruned;
        };
        let mut next: SearchState = self.clone();
        match effect {
            Effect::Mark => {
                if self.grid.square(target).is_taken() {
                    return Step::Pruned;
                }
                next.grid.take(target);
                next.path.push(target);
            }
            Effect::MarkAxis => {
                if self.grid.square(target).axis_taken(direction.axis()) {
                    return Step::Pruned;
                }
                next.grid.take_axis(target, direction.axis());
                next.path.push(target);
            }
            Effect::Teleport => {
                let Some(exit) = self.grid.teleport_target(target) else {
                    return Step::Pruned;
                };
                // The exit must be the other mouth of the pair
                if std::mem::discriminant(&self.grid.square(exit).kind)
                    != std::mem::discriminant(&kind)
                    || self.grid.square(target).is_taken()
                    || self.grid.square(exit).is_taken()
                {
                    return Step::Pruned;
                }
                next.grid.take(target);
                next.grid.take(exit);
                next.path.push(target);
                next.path.push(exit);
            }
        }
        next.heading = Some(direction);
        Step::Continue(next)
    }

    /// Enter the `b` endpoint of the current segment.
    fn reach_endpoint(&self, target: usize, direction: Direction) -> Step {
        let mut next: SearchState = self.clone();
        next.grid.take(target);
        next.path.push(target);

        if self.grid.is_finish(target) {
            return if next.grid.all_taken() {
                Step::Solved(next.path)
            } else {
                Step::Pruned
            };
        }

        // Continue with the next segment
        next.segment += 1;
        let Some((a, _)) = next.grid.endpoints().get(next.segment).copied() else {
            return Step::Pruned;
        };
        next.path.push(a);
        next.heading = None;
        debug!("    Segment {} done at {target} ({direction:?})", self.segment + 1);
        Step::Continue(next)
    }
}

/// Lazy iterator over the solutions of a grid.
///
/// The solutions are produced in breadth-first order. The consumer can stop early, for example
/// after finding more solutions than it accepts.
pub struct Solutions {
    pending: VecDeque<SearchState>,
    ready: VecDeque<Path>,

    /// Number of search states expanded so far.
    iteration: usize,
}

impl Solutions {
    /// Create the iterator. The search starts on the first call to [`Iterator::next`].
    pub fn new(grid: &Grid) -> Self {
        let mut pending: VecDeque<SearchState> = VecDeque::new();
        pending.push_back(SearchState::new(grid));
        Self {
            pending,
            ready: VecDeque::new(),
            iteration: 0,
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }
}

impl Iterator for Solutions {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if let Some(path) = self.ready.pop_front() {
                return Some(path);
            }
            let state: SearchState = self.pending.pop_front()?;
            self.iteration += 1;

            for direction in state.directions() {
                match state.step(direction) {
                    Step::Pruned => {}
                    Step::Continue(next) => self.pending.push_back(next),
                    Step::Solved(path) => {
                        debug!("    Solution: {:?}", path.get());
                        self.ready.push_back(path);
                    }
                }
            }
        }
    }
}

/// [`Solver`] object.
pub struct Solver {
    grid: Grid,

    /// Number of search states expanded by the last search.
    pub iteration: usize,

    /// Duration in seconds of the last search.
    pub duration: f32,

    /// Time when the search started. Used to compute the [`Solver::duration`].
    start: Instant,
}

impl Solver {
    /// Create the object.
    pub fn new(grid: &Grid) -> Self {
        Self {
            grid: grid.clone(),
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Return the solutions of the grid.
    ///
    /// If `limit` is provided, then the search stops after that number of solutions.
    pub fn solve(&mut self, limit: Option<usize>) -> Vec<Path> {
        self.start = Instant::now();

        let mut solutions: Solutions = Solutions::new(&self.grid);
        let found: Vec<Path> = match limit {
            Some(n) => solutions.by_ref().take(n).collect(),
            None => solutions.by_ref().collect(),
        };

        self.iteration = solutions.iteration();
        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Solutions = {}  Iterations = {}  Duration = {}",
            found.len(),
            self.iteration,
            self.duration
        );
        found
    }
}
