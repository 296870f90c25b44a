/*
grid.rs

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

//! Grid of squares built from a layout.
//!
//! The [`Grid`] object owns the traversal status of all its squares.
//! The solver clones the grid for each branch it explores, so that the branches never see each
//! other's changes.

use log::{Level, debug, log_enabled};

use super::formula::Variant;
use super::layout::{Layout, LayoutError, Subgroup, Token};
use super::square::{Axis, Square, SquareKind};

/// Moving directions in the grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Axis used when moving in that direction.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }
}

/// Grid object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    variant: Variant,
    squares: Vec<Square>,

    /// For each endpoint group (group 1 at index 0), the `a` and `b` squares.
    endpoints: Vec<(usize, usize)>,

    /// For each square, the other mouth of its tunnel.
    tunnels: Vec<Option<usize>>,
}

impl Grid {
    /// Create a [`Grid`] object from a layout.
    ///
    /// # Errors
    ///
    /// The method returns an error if a square is not allowed in the variant, if a pair is
    /// incomplete or duplicated, or if there is no endpoint pair.
    pub fn new(variant: Variant, layout: &Layout) -> Result<Self, LayoutError> {
        let size: usize = layout.len();
        let mut squares: Vec<Square> = Vec::with_capacity(size);

        for (index, token) in layout.tokens().iter().enumerate() {
            if !variant.allows(token) {
                return Err(LayoutError::NotAllowed {
                    token: *token,
                    variant: variant.to_string(),
                });
            }
            squares.push(Square::new(index, *token));
        }

        let endpoints: Vec<(usize, usize)> = Self::pairs(layout, "endpoint", |t| match t {
            Token::Endpoint { group, subgroup } => Some((*group, *subgroup)),
            _ => None,
        })?;
        if endpoints.is_empty() {
            return Err(LayoutError::NoEndpoint);
        }

        let mut tunnels: Vec<Option<usize>> = vec![None; size];
        let tunnel_pairs: Vec<(usize, usize)> = Self::pairs(layout, "tunnel", |t| match t {
            Token::Tunnel { group, subgroup } => Some((*group, *subgroup)),
            _ => None,
        })?;
        for (a, b) in tunnel_pairs {
            tunnels[a] = Some(b);
            tunnels[b] = Some(a);
        }

        // Portals are paired by position, but their groups still have to be complete
        Self::pairs(layout, "portal", |t| match t {
            Token::Portal { group, subgroup } => Some((*group, *subgroup)),
            _ => None,
        })?;

        let grid = Self {
            width: layout.width(),
            height: layout.height(),
            variant,
            squares,
            endpoints,
            tunnels,
        };
        if log_enabled!(Level::Debug) {
            debug!("Grid {}x{} ({variant}):", grid.width, grid.height);
            for line in layout.to_string().lines() {
                debug!("    {line}");
            }
        }
        Ok(grid)
    }

    /// Collect the `a` and `b` squares of each group of a paired square type.
    ///
    /// Groups must be numbered from 1 without gaps, and each group must have exactly one `a` and
    /// one `b` square.
    fn pairs<F>(
        layout: &Layout,
        kind: &'static str,
        pair_of: F,
    ) -> Result<Vec<(usize, usize)>, LayoutError>
    where
        F: Fn(&Token) -> Option<(usize, Subgroup)>,
    {
        let mut found: Vec<(Option<usize>, Option<usize>)> = Vec::new();

        for (index, token) in layout.tokens().iter().enumerate() {
            let Some((group, subgroup)) = pair_of(token) else {
                continue;
            };
            // Groups are numbered without gaps, so a pair never needs more groups than squares
            if group == 0 || group > layout.len() {
                return Err(LayoutError::BrokenPair { kind, group });
            }
            if found.len() < group {
                found.resize(group, (None, None));
            }
            let slot: &mut Option<usize> = match subgroup {
                Subgroup::A => &mut found[group - 1].0,
                Subgroup::B => &mut found[group - 1].1,
            };
            if slot.is_some() {
                return Err(LayoutError::BrokenPair { kind, group });
            }
            *slot = Some(index);
        }

        found
            .into_iter()
            .enumerate()
            .map(|(i, pair)| match pair {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(LayoutError::BrokenPair { kind, group: i + 1 }),
            })
            .collect()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of squares.
    pub fn size(&self) -> usize {
        self.squares.len()
    }

    pub fn square(&self, index: usize) -> &Square {
        &self.squares[index]
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Whether the square is in the top row.
    pub fn is_top(&self, index: usize) -> bool {
        index < self.width
    }

    /// Whether the square is in the bottom row.
    pub fn is_bottom(&self, index: usize) -> bool {
        index + self.width >= self.size()
    }

    /// Whether the square is in the leftmost column.
    pub fn is_left(&self, index: usize) -> bool {
        index % self.width == 0
    }

    /// Whether the square is in the rightmost column.
    pub fn is_right(&self, index: usize) -> bool {
        index % self.width == self.width - 1
    }

    /// Whether the square is on the border of the grid.
    pub fn is_border(&self, index: usize) -> bool {
        self.is_top(index) || self.is_bottom(index) || self.is_left(index) || self.is_right(index)
    }

    /// Whether there is a square next to the given square, in the given direction.
    pub fn has_neighbor(&self, index: usize, direction: Direction) -> bool {
        match direction {
            Direction::Up => !self.is_top(index),
            Direction::Down => !self.is_bottom(index),
            Direction::Left => !self.is_left(index),
            Direction::Right => !self.is_right(index),
        }
    }

    /// Return the index of the square next to the given square, in the given direction.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        if !self.has_neighbor(index, direction) {
            return None;
        }
        Some(match direction {
            Direction::Up => index - self.width,
            Direction::Down => index + self.width,
            Direction::Left => index - 1,
            Direction::Right => index + 1,
        })
    }

    /// Iterate over the squares adjacent to the given square.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(index, d))
    }

    /// Whether two squares are adjacent.
    pub fn is_adjacent(&self, index1: usize, index2: usize) -> bool {
        self.neighbors(index1).any(|i| i == index2)
    }

    /// The `a` and `b` squares of each endpoint group, group 1 first.
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    /// Whether the grid has only one endpoint pair.
    pub fn is_single_endpoint(&self) -> bool {
        self.endpoints.len() == 1
    }

    /// Square where the path starts.
    pub fn start(&self) -> usize {
        self.endpoints[0].0
    }

    /// Square where the path ends.
    pub fn finish(&self) -> usize {
        self.endpoints[self.endpoints.len() - 1].1
    }

    /// Whether the square is the finish of the whole path.
    pub fn is_finish(&self, index: usize) -> bool {
        index == self.finish()
    }

    /// Whether all the squares are taken.
    pub fn all_taken(&self) -> bool {
        self.squares.iter().all(Square::is_taken)
    }

    /// Mark the square as taken.
    pub fn take(&mut self, index: usize) {
        self.squares[index].take();
    }

    /// Mark the square as crossed along the given axis.
    pub fn take_axis(&mut self, index: usize, axis: Axis) {
        self.squares[index].take_axis(axis);
    }

    /// Return the other mouth of the tunnel.
    pub fn tunnel_partner(&self, index: usize) -> Option<usize> {
        self.tunnels.get(index).copied().flatten()
    }

    /// Return the square on the opposite side of the grid, for a square on the border.
    ///
    /// Squares in the top or bottom row (corners included) face the other end of their column.
    /// The other squares in the leftmost or rightmost column face the other end of their row.
    /// Squares inside the grid do not have an opposite square.
    pub fn portal_partner(&self, index: usize) -> Option<usize> {
        let span_y: usize = (self.height - 1) * self.width;
        let span_x: usize = self.width - 1;

        if self.height > 1 && self.is_top(index) {
            Some(index + span_y)
        } else if self.height > 1 && self.is_bottom(index) {
            Some(index - span_y)
        } else if self.width > 1 && self.is_left(index) {
            Some(index + span_x)
        } else if self.width > 1 && self.is_right(index) {
            Some(index - span_x)
        } else {
            None
        }
    }

    /// Return the square where the path lands after entering a tunnel or a portal.
    pub fn teleport_target(&self, index: usize) -> Option<usize> {
        match self.squares[index].kind {
            SquareKind::Tunnel { .. } => self.tunnel_partner(index),
            SquareKind::Portal { .. } => self.portal_partner(index),
            _ => None,
        }
    }

    /// Return the layout of the grid.
    pub fn layout(&self) -> Layout {
        Layout::from_parts(
            self.width,
            self.height,
            self.squares.iter().map(Square::token).collect(),
        )
    }
}
