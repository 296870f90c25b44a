/*
generator.rs

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

//! Generate and solve maze layouts.
//!
//! A [`formula::Formula`] describes a family of mazes: the grid size, the variant, and the number
//! of special squares.
//! Mazes are produced in three stages:
//!
//! * [`permutations::Permutations`] enumerates all the distinct [`layout::Layout`] objects of the
//!   formula.
//!   [`symmetry`] detects the layouts that are rotations or reflections of layouts already
//!   processed.
//!
//! * A [`grid::Grid`] object is built from each remaining layout, and [`validity::check`] drops
//!   the grids that cannot give a good maze.
//!
//! * [`solver::Solver`] searches all the paths through the grid.
//!   A layout is accepted when it has exactly the number of solutions set in
//!   [`constraints::Constraints`], usually one.
//!
//! [`pipeline::Pipeline`] chains these stages and saves the accepted layouts.

pub mod constraints;
pub mod formula;
pub mod grid;
pub mod layout;
pub mod path;
pub mod permutations;
pub mod pipeline;
pub mod solver;
pub mod square;
pub mod symmetry;
pub mod validity;
