/*
symmetry.rs

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

//! Rotations and reflections of layouts.
//!
//! Two layouts that are rotations or reflections of each other describe the same maze.
//! [`equivalents`] returns all the other members of the equivalence class of a layout so that the
//! pipeline can detect the layouts that it already produced.
//!
//! Quarter turns swap the grid dimensions and are therefore only used for square grids.

use super::layout::{Layout, Token};

/// Geometric transformation of a layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transform {
    RotateRight,
    RotateHalf,
    RotateLeft,
    FlipHorizontal,
    FlipVertical,
    FlipDiagonal,
    FlipAntiDiagonal,
}

/// Transformations that keep a rectangular grid in place.
const RECTANGLE: [Transform; 3] = [
    Transform::RotateHalf,
    Transform::FlipHorizontal,
    Transform::FlipVertical,
];

/// Transformations that keep a square grid in place.
const SQUARE: [Transform; 7] = [
    Transform::RotateRight,
    Transform::RotateHalf,
    Transform::RotateLeft,
    Transform::FlipHorizontal,
    Transform::FlipVertical,
    Transform::FlipDiagonal,
    Transform::FlipAntiDiagonal,
];

impl Transform {
    /// Return the transformations that apply to a grid of the given dimensions.
    pub fn for_grid(width: usize, height: usize) -> &'static [Transform] {
        if width == height { &SQUARE } else { &RECTANGLE }
    }

    /// Apply the transformation to the layout.
    pub fn apply(self, layout: &Layout) -> Layout {
        match self {
            Transform::RotateRight => rotate_right(layout),
            Transform::RotateHalf => rotate_half(layout),
            Transform::RotateLeft => rotate_half(&rotate_right(layout)),
            Transform::FlipHorizontal => flip_horizontal(layout),
            Transform::FlipVertical => flip_vertical(layout),
            Transform::FlipDiagonal => flip_horizontal(&rotate_right(layout)),
            Transform::FlipAntiDiagonal => flip_vertical(&rotate_right(layout)),
        }
    }
}

/// Rotate the layout a quarter turn clockwise.
///
/// The width and the height of the result are swapped.
pub fn rotate_right(layout: &Layout) -> Layout {
    let (w, h) = (layout.width(), layout.height());
    let tokens: &[Token] = layout.tokens();
    let mut rotated: Vec<Token> = Vec::with_capacity(tokens.len());

    // Each new row is an old column, read from the bottom
    for column in 0..w {
        for row in (0..h).rev() {
            rotated.push(tokens[row * w + column]);
        }
    }
    Layout::from_parts(h, w, rotated)
}

/// Rotate the layout half a turn.
pub fn rotate_half(layout: &Layout) -> Layout {
    let mut tokens: Vec<Token> = layout.tokens().to_vec();
    tokens.reverse();
    Layout::from_parts(layout.width(), layout.height(), tokens)
}

/// Mirror the layout left to right.
pub fn flip_horizontal(layout: &Layout) -> Layout {
    let tokens: Vec<Token> = layout
        .rows()
        .flat_map(|row| row.iter().rev().copied())
        .collect();
    Layout::from_parts(layout.width(), layout.height(), tokens)
}

/// Mirror the layout top to bottom.
pub fn flip_vertical(layout: &Layout) -> Layout {
    let rows: Vec<&[Token]> = layout.rows().collect();
    let tokens: Vec<Token> = rows.into_iter().rev().flatten().copied().collect();
    Layout::from_parts(layout.width(), layout.height(), tokens)
}

/// Return the other layouts of the equivalence class, without duplicates and without the layout
/// itself.
pub fn equivalents(layout: &Layout) -> Vec<Layout> {
    let mut result: Vec<Layout> = Vec::with_capacity(7);
    for transform in Transform::for_grid(layout.width(), layout.height()) {
        let l: Layout = transform.apply(layout);
        if l != *layout && !result.contains(&l) {
            result.push(l);
        }
    }
    result
}

/// Return the smallest key of the equivalence class.
///
/// All the layouts of the same class share this key.
pub fn canonical_key(layout: &Layout) -> String {
    equivalents(layout)
        .iter()
        .map(Layout::to_key)
        .fold(layout.to_key(), |smallest, key| smallest.min(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::layout::Subgroup;
    use proptest::prelude::*;

    fn layout(width: usize, height: usize, text: &str) -> Layout {
        Layout::parse(width, height, text).unwrap()
    }

    #[test]
    fn rotations_of_a_square_grid() {
        // endpoint_1_a normal
        // barrier      normal
        let l = layout(2, 2, "endpoint_1_a,normal,barrier,normal");
        assert_eq!(
            rotate_right(&l).to_key(),
            "barrier,endpoint_1_a,normal,normal"
        );
        assert_eq!(rotate_half(&l).to_key(), "normal,barrier,normal,endpoint_1_a");
        assert_eq!(
            Transform::RotateLeft.apply(&l).to_key(),
            "normal,normal,endpoint_1_a,barrier"
        );
    }

    #[test]
    fn rectangle_rotation_swaps_dimensions() {
        let l = layout(3, 2, "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier");
        let r = rotate_right(&l);
        assert_eq!((r.width(), r.height()), (2, 3));
        assert_eq!(
            r.to_key(),
            "normal,endpoint_1_a,normal,normal,barrier,endpoint_1_b"
        );
    }

    #[test]
    fn flips() {
        let l = layout(3, 2, "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier");
        assert_eq!(
            flip_horizontal(&l).to_key(),
            "endpoint_1_b,normal,endpoint_1_a,barrier,normal,normal"
        );
        assert_eq!(
            flip_vertical(&l).to_key(),
            "normal,normal,barrier,endpoint_1_a,normal,endpoint_1_b"
        );
    }

    #[test]
    fn rectangles_skip_quarter_turns() {
        let l = layout(3, 2, "endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier");
        let e = equivalents(&l);
        assert_eq!(e.len(), 3);
        assert!(e.iter().all(|v| v.width() == 3 && v.height() == 2));
    }

    #[test]
    fn symmetric_layout_has_fewer_equivalents() {
        let l = layout(2, 2, "barrier,normal,normal,barrier");
        let e = equivalents(&l);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].to_key(), "normal,barrier,barrier,normal");
    }

    fn token() -> impl Strategy<Value = Token> {
        prop_oneof![
            Just(Token::Normal),
            Just(Token::Barrier),
            Just(Token::Bridge),
            (1usize..3).prop_map(|group| Token::Endpoint {
                group,
                subgroup: Subgroup::A
            }),
            (1usize..3).prop_map(|group| Token::Portal {
                group,
                subgroup: Subgroup::B
            }),
        ]
    }

    fn any_layout() -> impl Strategy<Value = Layout> {
        (1usize..5, 1usize..5).prop_flat_map(|(w, h)| {
            prop::collection::vec(token(), w * h)
                .prop_map(move |tokens| Layout::from_parts(w, h, tokens))
        })
    }

    proptest! {
        #[test]
        fn four_quarter_turns_are_identity(l in any_layout()) {
            let mut r = l.clone();
            for _ in 0..4 {
                r = rotate_right(&r);
            }
            prop_assert_eq!(r, l);
        }

        #[test]
        fn flips_are_involutions(l in any_layout()) {
            prop_assert_eq!(flip_horizontal(&flip_horizontal(&l)), l.clone());
            prop_assert_eq!(flip_vertical(&flip_vertical(&l)), l.clone());
            prop_assert_eq!(rotate_half(&rotate_half(&l)), l);
        }

        #[test]
        fn equivalence_class_is_stable(l in any_layout()) {
            prop_assert_eq!(equivalents(&l), equivalents(&l));
            let key = canonical_key(&l);
            for other in equivalents(&l) {
                prop_assert_eq!(canonical_key(&other), key.clone());
            }
        }
    }
}
