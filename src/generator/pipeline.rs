/*
pipeline.rs

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

//! Produce the mazes of a formula.
//!
//! For each layout of the formula, the [`Pipeline`] object:
//!
//! 1. skips the layout if it, or one of its rotations or reflections, was already processed
//!    during the run or is already in the layout store.
//! 2. builds the grid and runs the structural checks of [`super::validity`].
//! 3. solves the grid and accepts the layout when it has exactly the number of solutions that the
//!    variant requires.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use super::constraints::Constraints;
use super::formula::{Formula, FormulaError};
use super::grid::Grid;
use super::layout::{Layout, LayoutError};
use super::path::Path;
use super::solver::Solver;
use super::symmetry;
use super::validity;
use crate::saver::store::{LayoutStore, StoreError};

/// Type of errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid formula: {0}")]
    Formula(#[from] FormulaError),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("layout store failure: {0}")]
    Store(#[from] StoreError),
}

/// Accepted layout and its solutions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SolvedLayout {
    /// Key of the formula that produced the layout (see [`Formula::key`]).
    pub formula_id: String,

    pub layout: Layout,

    pub solutions: Vec<Path>,
}

/// Result of processing a formula.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub formula_id: String,

    /// Accepted layouts, in the order they were produced.
    pub accepted: Vec<SolvedLayout>,

    /// Number of layouts produced by the permutation generator.
    pub candidates: usize,

    /// Layouts skipped because an equivalent layout was already processed or stored.
    pub duplicates: usize,

    /// Layouts that failed the structural checks.
    pub rejected: usize,

    /// Layouts that do not have the required number of solutions.
    pub unsolved: usize,

    /// Number of search states expanded by the solver.
    pub iterations: usize,

    /// Duration in seconds.
    pub duration: f32,
}

/// [`Pipeline`] object.
pub struct Pipeline<S: LayoutStore> {
    constraints: Arc<Constraints>,
    store: S,
}

impl<S: LayoutStore> Pipeline<S> {
    /// Create the object.
    pub fn new(constraints: Arc<Constraints>, store: S) -> Self {
        Self { constraints, store }
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the layouts of the formula that have exactly the required number of solutions.
    ///
    /// Nothing is saved. A formula without any valid layout produces an empty report.
    ///
    /// # Errors
    ///
    /// The method returns an error if the layout store cannot be queried.
    pub fn generate(&self, formula: &Formula) -> Result<GenerationReport, PipelineError> {
        let start: Instant = Instant::now();
        let required: usize = self.constraints.get(formula.variant()).required_solutions;
        let mut report = GenerationReport {
            formula_id: formula.key(),
            ..GenerationReport::default()
        };
        let mut processed: HashSet<String> = HashSet::new();

        info!("Processing formula {}", report.formula_id);
        for layout in formula.layouts() {
            report.candidates += 1;

            if !processed.insert(symmetry::canonical_key(&layout))
                || self.is_stored(&report.formula_id, &layout)?
            {
                report.duplicates += 1;
                continue;
            }

            let grid: Grid = Grid::new(formula.variant(), &layout)?;
            if validity::check(&grid).is_err() {
                report.rejected += 1;
                continue;
            }

            // One extra solution is enough to know that the layout has too many
            let mut solver: Solver = Solver::new(&grid);
            let solutions: Vec<Path> = solver.solve(Some(required + 1));
            report.iterations += solver.iteration;
            if solutions.len() != required {
                debug!("    {} solution(s), {required} required", solutions.len());
                report.unsolved += 1;
                continue;
            }

            debug!("    Accepted {}", layout.to_key());
            report.accepted.push(SolvedLayout {
                formula_id: report.formula_id.clone(),
                layout,
                solutions,
            });
        }

        report.duration = start.elapsed().as_secs_f32();
        info!(
            "Formula {}: {} accepted, {} candidates, {} duplicates, {} rejected, {} unsolved \
             ({} iterations, {}s)",
            report.formula_id,
            report.accepted.len(),
            report.candidates,
            report.duplicates,
            report.rejected,
            report.unsolved,
            report.iterations,
            report.duration
        );
        Ok(report)
    }

    /// Generate the layouts of the formula and save the accepted ones.
    ///
    /// # Errors
    ///
    /// The method returns an error if the layout store fails. In that case, none of the layouts
    /// of the run are saved and the formula can be run again.
    pub fn run(&self, formula: &Formula) -> Result<GenerationReport, PipelineError> {
        let report: GenerationReport = self.generate(formula)?;
        self.store.save_all(&report.accepted)?;
        Ok(report)
    }

    /// Whether the layout or one of its equivalents is already in the store.
    fn is_stored(&self, formula_id: &str, layout: &Layout) -> Result<bool, StoreError> {
        if self.store.exists(formula_id, &layout.to_key())? {
            return Ok(true);
        }
        for equivalent in symmetry::equivalents(layout) {
            if self.store.exists(formula_id, &equivalent.to_key())? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Return all the solutions of the grid.
///
/// A grid that fails the structural checks has no solution.
pub fn solve(grid: &Grid) -> Vec<Path> {
    if validity::check(grid).is_err() {
        return Vec::new();
    }
    Solver::new(grid).solve(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::formula::{FormulaParameters, Variant};
    use crate::saver::store::MemoryStore;

    fn formula(x: usize, y: usize, endpoints: usize, barriers: usize) -> Formula {
        Formula::new(
            FormulaParameters {
                x,
                y,
                variant: Variant::Plain,
                endpoints,
                barriers,
                secondary: 0,
            },
            &Constraints::default(),
        )
        .unwrap()
    }

    fn pipeline() -> Pipeline<MemoryStore> {
        Pipeline::new(Arc::new(Constraints::default()), MemoryStore::new())
    }

    #[test]
    fn small_plain_formula() {
        let p = pipeline();
        let report = p.generate(&formula(3, 2, 1, 1)).unwrap();

        assert_eq!(report.formula_id, "plain-3x2-e1-b1-s0");
        assert_eq!(report.candidates, 120);
        assert_eq!(report.accepted.len(), 3);
        assert_eq!(
            report.candidates,
            report.accepted.len() + report.duplicates + report.rejected + report.unsolved
        );
        assert!(!report.accepted.is_empty());
        for solved in &report.accepted {
            assert_eq!(solved.solutions.len(), 1);
            assert_eq!(solved.solutions[0].len(), 5);
        }
        // Nothing is saved by generate
        assert!(p.store().layouts(&report.formula_id).unwrap().is_empty());
    }

    #[test]
    fn accepted_layouts_are_not_equivalent() {
        let report = pipeline().generate(&formula(3, 3, 2, 1)).unwrap();
        assert!(!report.accepted.is_empty());
        let mut keys: HashSet<String> = HashSet::new();
        for solved in &report.accepted {
            assert!(keys.insert(symmetry::canonical_key(&solved.layout)));
        }
    }

    #[test]
    fn second_run_finds_only_duplicates() {
        let p = pipeline();
        let f = formula(3, 2, 1, 1);
        let first = p.run(&f).unwrap();
        assert!(!first.accepted.is_empty());
        assert_eq!(
            p.store().layouts(&first.formula_id).unwrap().len(),
            first.accepted.len()
        );

        // The accepted layouts are now in the store, the others are checked again
        let second = p.run(&f).unwrap();
        assert!(second.accepted.is_empty());
        assert_eq!(second.duplicates, first.duplicates + first.accepted.len());
        assert_eq!(second.rejected, first.rejected);
        assert_eq!(second.unsolved, first.unsolved);
    }

    #[test]
    fn solve_rejects_invalid_grid() {
        let layout = Layout::parse(
            3,
            2,
            "endpoint_1_a,endpoint_1_b,normal,normal,normal,barrier",
        )
        .unwrap();
        let grid = Grid::new(Variant::Plain, &layout).unwrap();
        assert!(solve(&grid).is_empty());

        let layout = Layout::parse(
            3,
            2,
            "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier",
        )
        .unwrap();
        let grid = Grid::new(Variant::Plain, &layout).unwrap();
        assert_eq!(solve(&grid), [Path::from_vec(&[0, 3, 4, 1, 2])]);
    }
}
