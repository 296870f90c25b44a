/*
path.rs

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

//! Path through the maze grid.

use serde::{Deserialize, Serialize};

/// Path object.
///
/// The path is the ordered list of the visited square indexes.
/// A bridge appears twice, once per crossing.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Path {
    path: Vec<usize>,
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(num_squares: usize) -> Self {
        Self {
            path: Vec::with_capacity(num_squares),
        }
    }

    /// Create a [`Path`] object from a vector.
    pub fn from_vec(path: &[usize]) -> Self {
        Self {
            path: path.to_vec(),
        }
    }

    /// Add a square to the path.
    pub fn push(&mut self, square: usize) {
        self.path.push(square);
    }

    /// Get the number of squares in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<usize> {
        &self.path
    }

    /// Number of times the square appears in the path.
    pub fn occurrences(&self, square: usize) -> usize {
        self.path.iter().filter(|s| **s == square).count()
    }

    /// Return the first square in the path.
    pub fn get_first(&self) -> Option<usize> {
        self.path.first().copied()
    }

    /// Return the last square in the path.
    pub fn get_last(&self) -> Option<usize> {
        self.path.last().copied()
    }
}
