/*
constraints.rs

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

//! Numeric limits for each maze variant.
//!
//! The [`Constraints`] object is loaded once at startup (see [`crate::config`]) and is then
//! shared read-only by all the pipelines.

use serde::{Deserialize, Serialize};

use super::formula::Variant;

/// Limits that a formula of a given variant must respect.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct VariantConstraints {
    /// Maximum number of squares (`x * y`).
    pub max_cells: usize,

    /// Maximum number of endpoint pairs.
    pub max_endpoints: usize,

    /// Maximum number of barriers.
    pub max_barriers: usize,

    /// Maximum number of bridges, tunnel pairs, or portal pairs.
    pub max_secondary: usize,

    /// Number of solutions a layout must have to be accepted.
    pub required_solutions: usize,
}

impl Default for VariantConstraints {
    fn default() -> Self {
        Self {
            max_cells: 16,
            max_endpoints: 2,
            max_barriers: 4,
            max_secondary: 2,
            required_solutions: 1,
        }
    }
}

/// Limits for all the variants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Constraints {
    pub plain: VariantConstraints,
    pub bridge: VariantConstraints,
    pub tunnel: VariantConstraints,
    pub portal: VariantConstraints,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            plain: VariantConstraints {
                max_secondary: 0,
                ..VariantConstraints::default()
            },
            bridge: VariantConstraints::default(),
            tunnel: VariantConstraints::default(),
            portal: VariantConstraints::default(),
        }
    }
}

impl Constraints {
    /// Return the limits for the given variant.
    pub fn get(&self, variant: Variant) -> &VariantConstraints {
        match variant {
            Variant::Plain => &self.plain,
            Variant::Bridge => &self.bridge,
            Variant::Tunnel => &self.tunnel,
            Variant::Portal => &self.portal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let c: Constraints =
            serde_json::from_str(r#"{"bridge": {"max_cells": 25}, "portal": {"required_solutions": 2}}"#)
                .unwrap();
        assert_eq!(c.get(Variant::Bridge).max_cells, 25);
        assert_eq!(c.get(Variant::Bridge).max_barriers, 4);
        assert_eq!(c.get(Variant::Portal).required_solutions, 2);
        assert_eq!(c.get(Variant::Plain), &Constraints::default().plain);
    }
}
