/*
lib.rs

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

//! Generate grid mazes that have a unique solution.
//!
//! A maze is a rectangular grid of squares. The player draws a single path from the start
//! square to the finish square that visits every square except the barriers.
//! Four variants exist: plain mazes, mazes with bridges that the path crosses twice, mazes with
//! tunnels, and mazes with portals on the border of the grid.
//!
//! See [`generator`] for the generation process, [`saver`] for the storage of the accepted
//! layouts, and [`worker`] to process several formulas in parallel.

pub mod config;
pub mod generator;
pub mod saver;
pub mod worker;
