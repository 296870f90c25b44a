/*
formula.rs

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

//! Maze formulas.
//!
//! A [`Formula`] describes a family of mazes: the grid dimensions, the maze variant, and the
//! number of special squares.
//! It is built from a [`FormulaParameters`] object, which is what the command line and the batch
//! files provide, and is then immutable.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

use super::constraints::Constraints;
use super::layout::{Subgroup, Token};
use super::permutations::Permutations;

/// Maze variant.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    #[default]
    Plain,
    Bridge,
    Tunnel,
    Portal,
}

impl Variant {
    /// Whether squares of the given type can be part of a maze of this variant.
    pub fn allows(self, token: &Token) -> bool {
        match token {
            Token::Normal | Token::Barrier | Token::Endpoint { .. } => true,
            Token::Bridge => self == Variant::Bridge,
            Token::Tunnel { .. } => self == Variant::Tunnel,
            Token::Portal { .. } => self == Variant::Portal,
        }
    }
}

/// Errors for malformed formulas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("the grid must be at least 1x1 (got {x}x{y})")]
    ZeroDimension { x: usize, y: usize },

    #[error("a maze needs at least one endpoint pair")]
    NoEndpoint,

    #[error("a plain maze cannot have secondary squares (got {0})")]
    UnexpectedSecondary(usize),

    #[error("{tokens} special squares do not fit in a grid of {cells} squares")]
    TooManyTokens { tokens: usize, cells: usize },

    #[error("{what} is {value}, but {variant} mazes allow at most {max}")]
    ConstraintExceeded {
        variant: Variant,
        what: &'static str,
        value: usize,
        max: usize,
    },
}

/// Parameters for the [`Formula`] object creation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FormulaParameters {
    /// Grid width.
    pub x: usize,

    /// Grid height.
    pub y: usize,

    /// Maze variant.
    #[serde(default)]
    pub variant: Variant,

    /// Number of endpoint pairs.
    #[serde(default = "one")]
    pub endpoints: usize,

    /// Number of barriers.
    #[serde(default)]
    pub barriers: usize,

    /// Number of bridges, tunnel pairs, or portal pairs, depending on the variant.
    #[serde(default)]
    pub secondary: usize,
}

fn one() -> usize {
    1
}

/// Validated formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    parameters: FormulaParameters,
}

impl Formula {
    /// Create a [`Formula`] object.
    ///
    /// # Errors
    ///
    /// The method returns an error if the parameters cannot describe a maze (no endpoint, more
    /// special squares than the grid can hold...) or if they exceed the limits set for the
    /// variant.
    pub fn new(
        parameters: FormulaParameters,
        constraints: &Constraints,
    ) -> Result<Self, FormulaError> {
        let p: FormulaParameters = parameters;
        if p.x == 0 || p.y == 0 {
            return Err(FormulaError::ZeroDimension { x: p.x, y: p.y });
        }
        if p.endpoints == 0 {
            return Err(FormulaError::NoEndpoint);
        }
        if p.variant == Variant::Plain && p.secondary > 0 {
            return Err(FormulaError::UnexpectedSecondary(p.secondary));
        }

        let limits = constraints.get(p.variant);
        for (what, value, max) in [
            ("the number of squares", p.x * p.y, limits.max_cells),
            ("the number of endpoint pairs", p.endpoints, limits.max_endpoints),
            ("the number of barriers", p.barriers, limits.max_barriers),
            ("the secondary count", p.secondary, limits.max_secondary),
        ] {
            if value > max {
                return Err(FormulaError::ConstraintExceeded {
                    variant: p.variant,
                    what,
                    value,
                    max,
                });
            }
        }

        let formula = Self { parameters: p };
        if formula.token_count() > formula.size() {
            return Err(FormulaError::TooManyTokens {
                tokens: formula.token_count(),
                cells: formula.size(),
            });
        }
        Ok(formula)
    }

    pub fn x(&self) -> usize {
        self.parameters.x
    }

    pub fn y(&self) -> usize {
        self.parameters.y
    }

    pub fn variant(&self) -> Variant {
        self.parameters.variant
    }

    pub fn endpoints(&self) -> usize {
        self.parameters.endpoints
    }

    pub fn barriers(&self) -> usize {
        self.parameters.barriers
    }

    pub fn secondary(&self) -> usize {
        self.parameters.secondary
    }

    pub fn parameters(&self) -> &FormulaParameters {
        &self.parameters
    }

    /// Number of squares in the grid.
    pub fn size(&self) -> usize {
        self.parameters.x * self.parameters.y
    }

    /// Number of special (non-filler) squares.
    pub fn token_count(&self) -> usize {
        let p = &self.parameters;
        let secondary: usize = match p.variant {
            Variant::Plain => 0,
            Variant::Bridge => p.secondary,
            Variant::Tunnel | Variant::Portal => 2 * p.secondary,
        };
        2 * p.endpoints + secondary + p.barriers
    }

    /// Number of normal filler squares.
    pub fn filler_count(&self) -> usize {
        self.size() - self.token_count()
    }

    /// Return the special squares of the formula, in canonical order.
    pub fn tokens(&self) -> Vec<Token> {
        let p = &self.parameters;
        let mut tokens: Vec<Token> = Vec::with_capacity(self.token_count());
        for group in 1..=p.endpoints {
            tokens.push(Token::Endpoint {
                group,
                subgroup: Subgroup::A,
            });
            tokens.push(Token::Endpoint {
                group,
                subgroup: Subgroup::B,
            });
        }
        match p.variant {
            Variant::Plain => (),
            Variant::Portal => {
                for group in 1..=p.secondary {
                    tokens.push(Token::Portal {
                        group,
                        subgroup: Subgroup::A,
                    });
                    tokens.push(Token::Portal {
                        group,
                        subgroup: Subgroup::B,
                    });
                }
            }
            Variant::Tunnel => {
                for group in 1..=p.secondary {
                    tokens.push(Token::Tunnel {
                        group,
                        subgroup: Subgroup::A,
                    });
                    tokens.push(Token::Tunnel {
                        group,
                        subgroup: Subgroup::B,
                    });
                }
            }
            Variant::Bridge => tokens.extend(std::iter::repeat_n(Token::Bridge, p.secondary)),
        }
        tokens.extend(std::iter::repeat_n(Token::Barrier, p.barriers));
        tokens
    }

    /// Return a new iterator over all the distinct layouts of the formula.
    pub fn layouts(&self) -> Permutations {
        Permutations::new(self.x(), self.y(), self.tokens())
    }

    /// Stable identifier of the formula, used as the key in the layout store.
    pub fn key(&self) -> String {
        let p = &self.parameters;
        format!(
            "{}-{}x{}-e{}-b{}-s{}",
            p.variant, p.x, p.y, p.endpoints, p.barriers, p.secondary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(x: usize, y: usize, variant: Variant) -> FormulaParameters {
        FormulaParameters {
            x,
            y,
            variant,
            endpoints: 1,
            barriers: 0,
            secondary: 0,
        }
    }

    #[test]
    fn plain_token_set() {
        let formula = Formula::new(
            FormulaParameters {
                barriers: 1,
                ..params(3, 2, Variant::Plain)
            },
            &Constraints::default(),
        )
        .unwrap();
        let text: Vec<String> = formula.tokens().iter().map(Token::to_string).collect();
        assert_eq!(text, ["endpoint_1_a", "endpoint_1_b", "barrier"]);
        assert_eq!(formula.filler_count(), 3);
        assert_eq!(formula.key(), "plain-3x2-e1-b1-s0");
    }

    #[test]
    fn secondary_tokens_per_variant() {
        let c = Constraints::default();
        let bridge = Formula::new(
            FormulaParameters {
                secondary: 2,
                ..params(4, 4, Variant::Bridge)
            },
            &c,
        )
        .unwrap();
        assert_eq!(bridge.token_count(), 4);
        assert_eq!(bridge.tokens()[2..], [Token::Bridge, Token::Bridge]);

        let tunnel = Formula::new(
            FormulaParameters {
                secondary: 1,
                ..params(3, 3, Variant::Tunnel)
            },
            &c,
        )
        .unwrap();
        assert_eq!(tunnel.token_count(), 4);
        assert_eq!(tunnel.tokens()[3], Token::Tunnel {
            group: 1,
            subgroup: Subgroup::B
        });
    }

    #[test]
    fn malformed_formulas() {
        let c = Constraints::default();
        assert_eq!(
            Formula::new(params(0, 3, Variant::Plain), &c),
            Err(FormulaError::ZeroDimension { x: 0, y: 3 })
        );
        assert_eq!(
            Formula::new(
                FormulaParameters {
                    endpoints: 0,
                    ..params(3, 3, Variant::Plain)
                },
                &c
            ),
            Err(FormulaError::NoEndpoint)
        );
        assert_eq!(
            Formula::new(
                FormulaParameters {
                    secondary: 1,
                    ..params(3, 3, Variant::Plain)
                },
                &c
            ),
            Err(FormulaError::UnexpectedSecondary(1))
        );
        assert_eq!(
            Formula::new(
                FormulaParameters {
                    endpoints: 2,
                    barriers: 1,
                    ..params(2, 2, Variant::Plain)
                },
                &c
            ),
            Err(FormulaError::TooManyTokens {
                tokens: 5,
                cells: 4
            })
        );
        assert!(matches!(
            Formula::new(params(5, 5, Variant::Plain), &c),
            Err(FormulaError::ConstraintExceeded { max: 16, .. })
        ));
    }

    #[test]
    fn batch_file_defaults() {
        let p: FormulaParameters = serde_json::from_str(r#"{"x": 3, "y": 2}"#).unwrap();
        assert_eq!(p, params(3, 2, Variant::Plain));
    }
}
