/*
generation.rs

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

use std::collections::HashSet;
use std::sync::Arc;

use mazewright::generator::constraints::Constraints;
use mazewright::generator::formula::{Formula, FormulaParameters, Variant};
use mazewright::generator::grid::Grid;
use mazewright::generator::layout::{Layout, Subgroup, Token};
use mazewright::generator::path::Path;
use mazewright::generator::pipeline::{GenerationReport, Pipeline};
use mazewright::generator::square::SquareKind;
use mazewright::generator::symmetry;
use mazewright::generator::validity::{self, Rejection};
use mazewright::saver::store::MemoryStore;

fn formula(variant: Variant, x: usize, y: usize, barriers: usize, secondary: usize) -> Formula {
    Formula::new(
        FormulaParameters {
            x,
            y,
            variant,
            endpoints: 1,
            barriers,
            secondary,
        },
        &Constraints::default(),
    )
    .unwrap()
}

fn generate(f: &Formula) -> GenerationReport {
    Pipeline::new(Arc::new(Constraints::default()), MemoryStore::new())
        .generate(f)
        .unwrap()
}

/// Verify that the path is a complete solution of the grid.
fn check_solution(grid: &Grid, path: &Path) {
    let p: &Vec<usize> = path.get();
    assert_eq!(path.get_first(), Some(grid.start()));
    assert_eq!(path.get_last(), Some(grid.finish()));

    for square in grid.squares() {
        let expected: usize = match square.kind {
            SquareKind::Barrier => 0,
            SquareKind::Bridge { .. } => 2,
            _ => 1,
        };
        assert_eq!(path.occurrences(square.index), expected, "square {}", square.index);
    }

    // Entering a mouth always leads to its paired mouth
    let mut i: usize = 0;
    while i < p.len() {
        match grid.square(p[i]).kind {
            SquareKind::Tunnel { .. } | SquareKind::Portal { .. } => {
                assert_eq!(
                    p.get(i + 1).copied(),
                    grid.teleport_target(p[i]),
                    "mouth {} in {p:?}",
                    p[i]
                );
                i += 2;
            }
            _ => i += 1,
        }
    }

    for w in p.windows(2) {
        let (from, to) = (w[0], w[1]);
        let teleport: bool = grid.teleport_target(from) == Some(to);
        let hop: bool = matches!(
            (grid.square(from).kind, grid.square(to).kind),
            (
                SquareKind::Endpoint {
                    group: g1,
                    subgroup: Subgroup::B
                },
                SquareKind::Endpoint {
                    group: g2,
                    subgroup: Subgroup::A
                },
            ) if g2 == g1 + 1
        );
        assert!(
            grid.is_adjacent(from, to) || teleport || hop,
            "{from} -> {to} in {p:?}"
        );
    }
}

#[test]
fn small_plain_formula_has_a_unique_maze() {
    let f = formula(Variant::Plain, 3, 2, 1, 0);
    assert_eq!(
        f.tokens(),
        [
            Token::Endpoint {
                group: 1,
                subgroup: Subgroup::A
            },
            Token::Endpoint {
                group: 1,
                subgroup: Subgroup::B
            },
            Token::Barrier
        ]
    );
    assert_eq!(f.filler_count(), 3);

    let report = generate(&f);
    assert!(!report.accepted.is_empty());
    for solved in &report.accepted {
        assert_eq!(solved.solutions.len(), 1);
        // Every square except the barrier
        assert_eq!(solved.solutions[0].len(), 5);
        let grid = Grid::new(Variant::Plain, &solved.layout).unwrap();
        check_solution(&grid, &solved.solutions[0]);
    }
}

#[test]
fn layouts_hold_the_formula_tokens() {
    let f = formula(Variant::Tunnel, 3, 2, 0, 1);
    let mut expected: Vec<Token> = f.tokens();
    expected.resize(6, Token::Normal);
    expected.sort();

    let mut seen: HashSet<Layout> = HashSet::new();
    for layout in f.layouts() {
        assert_eq!(layout.len(), 6);
        let mut tokens: Vec<Token> = layout.tokens().to_vec();
        tokens.sort();
        assert_eq!(tokens, expected);
        assert!(seen.insert(layout));
    }
    // 6! / 2! normal squares
    assert_eq!(seen.len(), 360);
}

#[test]
fn accepted_layouts_are_never_equivalent() {
    for f in [
        formula(Variant::Tunnel, 3, 3, 1, 1),
        formula(Variant::Portal, 3, 3, 1, 1),
    ] {
        let report = generate(&f);
        assert!(!report.accepted.is_empty(), "{}", f.key());

        let mut keys: HashSet<String> = HashSet::new();
        for solved in &report.accepted {
            assert!(keys.insert(symmetry::canonical_key(&solved.layout)));
            for e in symmetry::equivalents(&solved.layout) {
                assert!(!report.accepted.iter().any(|s| s.layout == e));
            }
        }
    }
}

#[test]
fn solutions_of_every_variant_are_complete() {
    for f in [
        formula(Variant::Plain, 3, 2, 1, 0),
        formula(Variant::Bridge, 4, 3, 1, 1),
        formula(Variant::Tunnel, 3, 3, 1, 1),
        formula(Variant::Portal, 3, 3, 1, 1),
    ] {
        let report = generate(&f);
        assert!(!report.accepted.is_empty(), "{}", f.key());
        for solved in &report.accepted {
            let grid = Grid::new(f.variant(), &solved.layout).unwrap();
            for s in &solved.solutions {
                check_solution(&grid, s);
            }
        }
    }
}

#[test]
fn bridge_is_crossed_once_per_direction() {
    let report = generate(&formula(Variant::Bridge, 4, 3, 1, 1));
    for solved in &report.accepted {
        let bridge: usize = solved
            .layout
            .tokens()
            .iter()
            .position(|t| *t == Token::Bridge)
            .unwrap();
        let p: &Vec<usize> = solved.solutions[0].get();
        let crossings: Vec<usize> = (1..p.len() - 1).filter(|i| p[*i] == bridge).collect();
        assert_eq!(crossings.len(), 2);

        // Straight through, once vertically and once horizontally
        let width: usize = solved.layout.width();
        let vertical: Vec<bool> = crossings
            .iter()
            .map(|i| p[i - 1].abs_diff(p[i + 1]) == 2 * width)
            .collect();
        assert!(vertical.contains(&true) && vertical.contains(&false));
    }
}

#[test]
fn portals_off_the_border_are_rejected_before_search() {
    let f = formula(Variant::Portal, 3, 3, 1, 1);
    let mut checked: usize = 0;
    for layout in f.layouts() {
        // Square 4 is the center of the grid
        if !matches!(layout.tokens()[4], Token::Portal { .. }) {
            continue;
        }
        let grid = Grid::new(Variant::Portal, &layout).unwrap();
        let result = validity::check(&grid);
        assert!(result.is_err());
        if !matches!(
            result,
            Err(Rejection::FinishNextToStart { .. } | Rejection::AmbiguousFinish { .. })
        ) {
            assert_eq!(result, Err(Rejection::PortalOffBorder(4)));
        }
        checked += 1;
    }
    assert!(checked > 0);
}
