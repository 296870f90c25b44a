/*
square.rs

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

//! Squares of a maze grid and their traversal status.

use super::layout::{Subgroup, Token};

/// Traversal status of a square.
///
/// - a `NotTaken` square has not been visited by the path yet.
/// - a `Taken` square is part of the path, or cannot be visited at all (barriers).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    NotTaken,
    Taken,
}

/// Direction of travel across a bridge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Type of the square, with its type-specific data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SquareKind {
    Normal,
    Barrier,
    Endpoint { group: usize, subgroup: Subgroup },
    /// A bridge is crossed once in each direction.
    Bridge { horizontal: Status, vertical: Status },
    Tunnel { group: usize, subgroup: Subgroup },
    Portal { group: usize, subgroup: Subgroup },
}

/// Square object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Square {
    /// Position in the grid (row-major, starting at 0).
    pub index: usize,

    pub kind: SquareKind,

    status: Status,
}

impl Square {
    /// Create a [`Square`] object from its layout token.
    ///
    /// Barriers and `a` endpoints (the starting points of the path segments) are created
    /// already taken.
    pub fn new(index: usize, token: Token) -> Self {
        let (kind, status) = match token {
            Token::Normal => (SquareKind::Normal, Status::NotTaken),
            Token::Barrier => (SquareKind::Barrier, Status::Taken),
            Token::Bridge => (
                SquareKind::Bridge {
                    horizontal: Status::NotTaken,
                    vertical: Status::NotTaken,
                },
                Status::NotTaken,
            ),
            Token::Endpoint { group, subgroup } => (
                SquareKind::Endpoint { group, subgroup },
                if subgroup == Subgroup::A {
                    Status::Taken
                } else {
                    Status::NotTaken
                },
            ),
            Token::Tunnel { group, subgroup } => {
                (SquareKind::Tunnel { group, subgroup }, Status::NotTaken)
            }
            Token::Portal { group, subgroup } => {
                (SquareKind::Portal { group, subgroup }, Status::NotTaken)
            }
        };
        Self {
            index,
            kind,
            status,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the square is completely taken. A bridge is taken once crossed both ways.
    pub fn is_taken(&self) -> bool {
        self.status == Status::Taken
    }

    pub fn is_normal(&self) -> bool {
        self.kind == SquareKind::Normal
    }

    /// Mark the square as taken.
    pub fn take(&mut self) {
        if let SquareKind::Bridge {
            horizontal,
            vertical,
        } = &mut self.kind
        {
            *horizontal = Status::Taken;
            *vertical = Status::Taken;
        }
        self.status = Status::Taken;
    }

    /// Whether the bridge has already been crossed in the given direction.
    ///
    /// Other squares are crossed only once, so their global status is returned.
    pub fn axis_taken(&self, axis: Axis) -> bool {
        match self.kind {
            SquareKind::Bridge {
                horizontal,
                vertical,
            } => match axis {
                Axis::Horizontal => horizontal == Status::Taken,
                Axis::Vertical => vertical == Status::Taken,
            },
            _ => self.is_taken(),
        }
    }

    /// Mark one direction of a bridge as taken.
    ///
    /// The bridge becomes taken when both directions are. For other squares, the square is
    /// taken.
    pub fn take_axis(&mut self, axis: Axis) {
        match &mut self.kind {
            SquareKind::Bridge {
                horizontal,
                vertical,
            } => {
                match axis {
                    Axis::Horizontal => *horizontal = Status::Taken,
                    Axis::Vertical => *vertical = Status::Taken,
                }
                if *horizontal == Status::Taken && *vertical == Status::Taken {
                    self.status = Status::Taken;
                }
            }
            _ => self.status = Status::Taken,
        }
    }

    /// Return the layout token of the square.
    pub fn token(&self) -> Token {
        match self.kind {
            SquareKind::Normal => Token::Normal,
            SquareKind::Barrier => Token::Barrier,
            SquareKind::Bridge { .. } => Token::Bridge,
            SquareKind::Endpoint { group, subgroup } => Token::Endpoint { group, subgroup },
            SquareKind::Tunnel { group, subgroup } => Token::Tunnel { group, subgroup },
            SquareKind::Portal { group, subgroup } => Token::Portal { group, subgroup },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_status() {
        assert!(Square::new(0, Token::Barrier).is_taken());
        assert!(!Square::new(0, Token::Normal).is_taken());
        assert!(
            Square::new(0, Token::Endpoint {
                group: 1,
                subgroup: Subgroup::A
            })
            .is_taken()
        );
        assert!(
            !Square::new(0, Token::Endpoint {
                group: 1,
                subgroup: Subgroup::B
            })
            .is_taken()
        );
    }

    #[test]
    fn bridge_is_crossed_once_per_axis() {
        let mut s = Square::new(4, Token::Bridge);
        s.take_axis(Axis::Horizontal);
        assert!(s.axis_taken(Axis::Horizontal));
        assert!(!s.axis_taken(Axis::Vertical));
        assert!(!s.is_taken());

        s.take_axis(Axis::Vertical);
        assert!(s.is_taken());
        assert_eq!(s.token(), Token::Bridge);
    }

    #[test]
    fn take_normal_square() {
        let mut s = Square::new(2, Token::Normal);
        s.take_axis(Axis::Vertical);
        assert!(s.is_taken());
        assert_eq!(s.status(), Status::Taken);
    }
}
