/*
saver.rs

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

//! Save and restore the accepted layouts.
//!
//! [`store::LayoutStore`] is the interface that the pipeline uses to detect the layouts that
//! are already saved, and to save the new ones.
//! [`store::MemoryStore`] keeps the layouts in memory only, and [`layouts::JsonStore`] also
//! saves them in a JSON file.

pub mod layouts;
pub mod store;
