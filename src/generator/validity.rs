/*
validity.rs

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

//! Structural checks run before solving a layout.
//!
//! A layout that fails these checks is dropped without searching for a path.

use log::debug;
use thiserror::Error;

use super::formula::Variant;
use super::grid::Grid;
use super::layout::Subgroup;
use super::square::SquareKind;

/// Reason why a layout is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the finish {finish} is next to the start {start}")]
    FinishNextToStart { start: usize, finish: usize },

    #[error("the finish {finish} is next to {count} normal squares")]
    AmbiguousFinish { finish: usize, count: usize },

    #[error("endpoints {first} and {second} of different pairs are adjacent")]
    EndpointsTouch { first: usize, second: usize },

    #[error("bridge {0} is on the border")]
    BridgeOnBorder(usize),

    #[error("bridge {bridge} is next to barrier {barrier}")]
    BridgeNextToBarrier { bridge: usize, barrier: usize },

    #[error("portal {0} is not on the border")]
    PortalOffBorder(usize),

    #[error("portal {0} does not face the other portal of its pair")]
    PortalMismatch(usize),
}

/// Verify the structure of the grid.
///
/// # Errors
///
/// Return the first [`Rejection`] found.
pub fn check(grid: &Grid) -> Result<(), Rejection> {
    let result: Result<(), Rejection> = check_endpoints(grid).and_then(|()| match grid.variant() {
        Variant::Bridge => check_bridges(grid),
        Variant::Portal => check_portals(grid),
        Variant::Plain | Variant::Tunnel => Ok(()),
    });
    if let Err(r) = &result {
        debug!("    Rejected: {r}");
    }
    result
}

fn check_endpoints(grid: &Grid) -> Result<(), Rejection> {
    if grid.is_single_endpoint() {
        let (start, finish) = (grid.start(), grid.finish());
        if grid.is_adjacent(start, finish) {
            return Err(Rejection::FinishNextToStart { start, finish });
        }
        let count: usize = grid
            .neighbors(finish)
            .filter(|i| grid.square(*i).is_normal())
            .count();
        if count > 1 {
            return Err(Rejection::AmbiguousFinish { finish, count });
        }
        return Ok(());
    }

    for (group, (a, b)) in grid.endpoints().iter().enumerate() {
        for first in [*a, *b] {
            for second in grid.neighbors(first) {
                if let SquareKind::Endpoint { group: other, .. } = grid.square(second).kind
                    && other != group + 1
                {
                    return Err(Rejection::EndpointsTouch { first, second });
                }
            }
        }
    }
    Ok(())
}

fn check_bridges(grid: &Grid) -> Result<(), Rejection> {
    for bridge in grid
        .squares()
        .iter()
        .filter(|s| matches!(s.kind, SquareKind::Bridge { .. }))
        .map(|s| s.index)
    {
        if grid.is_border(bridge) {
            return Err(Rejection::BridgeOnBorder(bridge));
        }
        if let Some(barrier) = grid
            .neighbors(bridge)
            .find(|i| grid.square(*i).kind == SquareKind::Barrier)
        {
            return Err(Rejection::BridgeNextToBarrier { bridge, barrier });
        }
    }
    Ok(())
}

fn check_portals(grid: &Grid) -> Result<(), Rejection> {
    let portals: Vec<(usize, usize, Subgroup)> = grid
        .squares()
        .iter()
        .filter_map(|s| match s.kind {
            SquareKind::Portal { group, subgroup } => Some((s.index, group, subgroup)),
            _ => None,
        })
        .collect();

    if let Some((index, _, _)) = portals.iter().find(|(i, _, _)| !grid.is_border(*i)) {
        return Err(Rejection::PortalOffBorder(*index));
    }
    for (index, group, subgroup) in portals {
        let faces_partner: bool = grid.portal_partner(index).is_some_and(|p| {
            grid.square(p).kind
                == SquareKind::Portal {
                    group,
                    subgroup: subgroup.other(),
                }
        });
        if !faces_partner {
            return Err(Rejection::PortalMismatch(index));
        }
    }
    Ok(())
}
