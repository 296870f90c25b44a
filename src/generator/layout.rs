/*
layout.rs

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

//! Square tokens and layouts.
//!
//! A [`Layout`] is the flat, row-major list of the [`Token`] objects of a maze.
//! The textual form of the tokens (`endpoint_1_a`, `portal_2_b`, `bridge`, `barrier`,
//! `normal`...) is the form stored by the layout store, and the comma-separated list returned by
//! [`Layout::to_key`] is the key used to detect duplicated layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Errors raised when building a layout or a grid from tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The token text is not recognized.
    #[error("unknown square token `{0}`")]
    BadToken(String),

    /// The number of tokens does not match the grid size.
    #[error("layout has {found} squares but the {width}x{height} grid needs {expected}")]
    WrongLength {
        width: usize,
        height: usize,
        expected: usize,
        found: usize,
    },

    /// The token type is not used by the maze variant.
    #[error("square `{token}` is not allowed in a {variant} maze")]
    NotAllowed { token: Token, variant: String },

    /// One of the two squares of a pair is missing or duplicated.
    #[error("{kind} pair {group} is incomplete or duplicated")]
    BrokenPair { kind: &'static str, group: usize },

    /// The layout does not define any start square.
    #[error("layout has no endpoint pair")]
    NoEndpoint,
}

/// Member of a square pair.
///
/// For endpoints, `A` is the start and `B` the finish. For tunnels and portals, `A` and `B` are
/// the two mouths.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Subgroup {
    A,
    B,
}

impl Subgroup {
    /// Return the other member of the pair.
    pub fn other(self) -> Self {
        match self {
            Subgroup::A => Subgroup::B,
            Subgroup::B => Subgroup::A,
        }
    }
}

/// Type of a square in a layout.
///
/// The variant declaration order is the canonical order used by the permutation generator:
/// endpoints, then portals, tunnels, bridges, barriers, and finally the normal filler squares.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr,
)]
#[serde(into = "String", try_from = "String")]
#[strum(serialize_all = "lowercase")]
pub enum Token {
    Endpoint { group: usize, subgroup: Subgroup },
    Portal { group: usize, subgroup: Subgroup },
    Tunnel { group: usize, subgroup: Subgroup },
    Bridge,
    Barrier,
    Normal,
}

impl Token {
    /// Group and subgroup of a paired square.
    pub fn pair(&self) -> Option<(usize, Subgroup)> {
        match *self {
            Token::Endpoint { group, subgroup }
            | Token::Portal { group, subgroup }
            | Token::Tunnel { group, subgroup } => Some((group, subgroup)),
            _ => None,
        }
    }

    /// Whether the token is a filler square.
    pub fn is_normal(&self) -> bool {
        *self == Token::Normal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.pair() {
            Some((group, subgroup)) => write!(f, "{}_{group}_{subgroup}", self.as_ref()),
            None => f.write_str(self.as_ref()),
        }
    }
}

impl FromStr for Token {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || LayoutError::BadToken(s.to_string());

        match s {
            "normal" => return Ok(Token::Normal),
            "barrier" => return Ok(Token::Barrier),
            "bridge" => return Ok(Token::Bridge),
            _ => (),
        }

        let mut parts = s.split('_');
        let (Some(kind), Some(group), Some(subgroup), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        let group: usize = group.parse().map_err(|_| bad())?;
        if group == 0 {
            return Err(bad());
        }
        let subgroup: Subgroup = match subgroup {
            "a" => Subgroup::A,
            "b" => Subgroup::B,
            _ => return Err(bad()),
        };
        match kind {
            "endpoint" => Ok(Token::Endpoint { group, subgroup }),
            "portal" => Ok(Token::Portal { group, subgroup }),
            "tunnel" => Ok(Token::Tunnel { group, subgroup }),
            _ => Err(bad()),
        }
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.to_string()
    }
}

impl TryFrom<String> for Token {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Concrete arrangement of the squares of a maze, row by row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "LayoutFields")]
pub struct Layout {
    width: usize,
    height: usize,
    tokens: Vec<Token>,
}

/// Deserialized fields, checked by [`Layout::new`].
#[derive(Deserialize)]
struct LayoutFields {
    width: usize,
    height: usize,
    tokens: Vec<Token>,
}

impl TryFrom<LayoutFields> for Layout {
    type Error = LayoutError;

    fn try_from(fields: LayoutFields) -> Result<Self, Self::Error> {
        Layout::new(fields.width, fields.height, fields.tokens)
    }
}

impl Layout {
    /// Create a [`Layout`] object.
    ///
    /// # Errors
    ///
    /// Return an error if the number of tokens is not `width * height`.
    pub fn new(width: usize, height: usize, tokens: Vec<Token>) -> Result<Self, LayoutError> {
        let expected: usize = width.saturating_mul(height);
        if tokens.len() != expected {
            return Err(LayoutError::WrongLength {
                width,
                height,
                expected,
                found: tokens.len(),
            });
        }
        Ok(Self::from_parts(width, height, tokens))
    }

    /// Parse the comma-separated form returned by [`Layout::to_key`].
    pub fn parse(width: usize, height: usize, text: &str) -> Result<Self, LayoutError> {
        let tokens: Vec<Token> = text
            .split(',')
            .map(|t| t.trim().parse())
            .collect::<Result<_, _>>()?;
        Self::new(width, height, tokens)
    }

    /// Build a layout the caller already knows to be consistent.
    pub(crate) fn from_parts(width: usize, height: usize, tokens: Vec<Token>) -> Self {
        Self {
            width,
            height,
            tokens,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the tokens, row by row.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Return the number of squares.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of normal filler squares.
    pub fn filler_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_normal()).count()
    }

    /// Iterate over the rows of the layout.
    pub fn rows(&self) -> impl Iterator<Item = &[Token]> {
        self.tokens.chunks(self.width.max(1))
    }

    /// Serialized form of the layout, used as the deduplication key.
    pub fn to_key(&self) -> String {
        self.tokens
            .iter()
            .map(Token::to_string)
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// Print the layout as a grid, one row per line.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|t| format!("{:<12}", t.to_string())).collect();
            writeln!(f, "{}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_text_form() {
        let t = Token::Endpoint {
            group: 1,
            subgroup: Subgroup::A,
        };
        assert_eq!(t.to_string(), "endpoint_1_a");
        assert_eq!(
            Token::Portal {
                group: 2,
                subgroup: Subgroup::B
            }
            .to_string(),
            "portal_2_b"
        );
        assert_eq!(Token::Bridge.to_string(), "bridge");
        assert_eq!(Token::Barrier.to_string(), "barrier");
        assert_eq!(Token::Normal.to_string(), "normal");
        assert_eq!("tunnel_3_b".parse::<Token>().unwrap(), Token::Tunnel {
            group: 3,
            subgroup: Subgroup::B
        });
    }

    #[test]
    fn bad_tokens_are_rejected() {
        for text in ["", "wall", "endpoint_1", "endpoint_0_a", "portal_1_c", "tunnel_x_a"] {
            assert!(text.parse::<Token>().is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn canonical_order() {
        let mut tokens = vec![
            Token::Normal,
            Token::Barrier,
            Token::Bridge,
            Token::Tunnel {
                group: 1,
                subgroup: Subgroup::A,
            },
            Token::Portal {
                group: 1,
                subgroup: Subgroup::B,
            },
            Token::Endpoint {
                group: 1,
                subgroup: Subgroup::B,
            },
            Token::Endpoint {
                group: 1,
                subgroup: Subgroup::A,
            },
        ];
        tokens.sort();
        let text: Vec<String> = tokens.iter().map(Token::to_string).collect();
        assert_eq!(
            text,
            [
                "endpoint_1_a",
                "endpoint_1_b",
                "portal_1_b",
                "tunnel_1_a",
                "bridge",
                "barrier",
                "normal"
            ]
        );
    }

    #[test]
    fn key_round_trip_and_length_check() {
        let layout =
            Layout::parse(3, 2, "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier").unwrap();
        assert_eq!(layout.filler_count(), 3);
        assert_eq!(
            layout.to_key(),
            "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier"
        );
        assert!(matches!(
            Layout::parse(3, 3, &layout.to_key()),
            Err(LayoutError::WrongLength { found: 6, .. })
        ));
    }

    #[test]
    fn serde_uses_wire_form() {
        let layout = Layout::parse(2, 1, "endpoint_1_a,endpoint_1_b").unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains("\"endpoint_1_a\""));
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn deserialization_checks_the_size() {
        let layout: Layout = serde_json::from_str(
            r#"{"width": 2, "height": 1, "tokens": ["endpoint_1_a", "endpoint_1_b"]}"#,
        )
        .unwrap();
        assert_eq!(layout, Layout::parse(2, 1, "endpoint_1_a,endpoint_1_b").unwrap());

        let short = r#"{"width": 3, "height": 2, "tokens": ["endpoint_1_a", "endpoint_1_b"]}"#;
        assert!(serde_json::from_str::<Layout>(short).is_err());
    }
}
