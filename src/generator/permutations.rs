/*
permutations.rs

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

//! Enumerate the layouts of a formula.
//!
//! The first layout has all the special squares packed at the beginning of the grid, in
//! canonical order, followed by the normal squares.
//! Each call to [`Iterator::next`] then moves to the next arrangement in lexicographic order.
//! Identical squares (normal squares, bridges, barriers) are interchangeable, so an arrangement
//! is never produced twice.

use log::debug;

use super::layout::{Layout, Token};

/// Iterator over all the distinct arrangements of a list of tokens on a grid.
#[derive(Debug, Clone)]
pub struct Permutations {
    width: usize,
    height: usize,

    /// Arrangement to return on the next call, or `None` when the sequence is exhausted.
    current: Option<Vec<Token>>,

    /// Number of layouts returned so far.
    pub produced: usize,
}

impl Permutations {
    /// Create a [`Permutations`] object.
    ///
    /// The special tokens are padded with normal squares up to `width * height`.
    /// If there are more tokens than squares, the iterator is empty.
    pub fn new(width: usize, height: usize, tokens: Vec<Token>) -> Self {
        let size: usize = width * height;
        let current: Option<Vec<Token>> = if tokens.len() > size {
            None
        } else {
            let mut start: Vec<Token> = tokens;
            start.resize(size, Token::Normal);
            start.sort_unstable();
            Some(start)
        };
        Self {
            width,
            height,
            current,
            produced: 0,
        }
    }
}

impl Iterator for Permutations {
    type Item = Layout;

    fn next(&mut self) -> Option<Self::Item> {
        let tokens: Vec<Token> = self.current.take()?;
        let mut following: Vec<Token> = tokens.clone();
        if next_arrangement(&mut following) {
            self.current = Some(following);
        } else {
            debug!("Last of {} layouts reached", self.produced + 1);
        }
        self.produced += 1;
        Some(Layout::from_parts(self.width, self.height, tokens))
    }
}

/// Rearrange the tokens into the next greater arrangement in lexicographic order.
///
/// Return `false`, and leave the slice unchanged, if it already holds the last arrangement.
fn next_arrangement(tokens: &mut [Token]) -> bool {
    let l: usize = tokens.len();
    if l < 2 {
        return false;
    }

    // Longest non-increasing suffix
    let mut i: usize = l - 1;
    while i > 0 && tokens[i - 1] >= tokens[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    // Rightmost token greater than the pivot
    let pivot: usize = i - 1;
    let mut j: usize = l - 1;
    while tokens[j] <= tokens[pivot] {
        j -= 1;
    }
    tokens.swap(pivot, j);
    tokens[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::layout::Subgroup;
    use std::collections::HashSet;

    fn endpoint(group: usize, subgroup: Subgroup) -> Token {
        Token::Endpoint { group, subgroup }
    }

    fn sorted(tokens: &[Token]) -> Vec<Token> {
        let mut t: Vec<Token> = tokens.to_vec();
        t.sort_unstable();
        t
    }

    #[test]
    fn first_layout_is_packed() {
        let tokens = vec![
            Token::Barrier,
            endpoint(1, Subgroup::B),
            endpoint(1, Subgroup::A),
        ];
        let first: Layout = Permutations::new(3, 2, tokens).next().unwrap();
        assert_eq!(
            first.to_key(),
            "endpoint_1_a,endpoint_1_b,barrier,normal,normal,normal"
        );
    }

    #[test]
    fn all_distinct_arrangements() {
        // 6! / 3! (three interchangeable normal squares)
        let tokens = vec![
            endpoint(1, Subgroup::A),
            endpoint(1, Subgroup::B),
            Token::Barrier,
        ];
        let expected: Vec<Token> = sorted(&[
            endpoint(1, Subgroup::A),
            endpoint(1, Subgroup::B),
            Token::Barrier,
            Token::Normal,
            Token::Normal,
            Token::Normal,
        ]);

        let layouts: Vec<Layout> = Permutations::new(3, 2, tokens).collect();
        assert_eq!(layouts.len(), 120);

        let keys: HashSet<String> = layouts.iter().map(Layout::to_key).collect();
        assert_eq!(keys.len(), layouts.len());
        for layout in &layouts {
            assert_eq!(layout.len(), 6);
            assert_eq!(sorted(layout.tokens()), expected);
        }
    }

    #[test]
    fn lexicographic_and_restartable() {
        let tokens = vec![Token::Bridge, Token::Bridge, Token::Barrier];
        let first: Vec<Layout> = Permutations::new(2, 2, tokens.clone()).collect();
        let second: Vec<Layout> = Permutations::new(2, 2, tokens).collect();
        assert_eq!(first, second);
        // 4! / (2! * 1! * 1!)
        assert_eq!(first.len(), 12);
        for pair in first.windows(2) {
            assert!(pair[0].tokens() < pair[1].tokens());
        }
    }

    #[test]
    fn too_many_tokens() {
        let tokens = vec![Token::Barrier; 5];
        assert_eq!(Permutations::new(2, 2, tokens).count(), 0);
    }

    #[test]
    fn single_square() {
        let layouts: Vec<Layout> = Permutations::new(1, 1, vec![Token::Barrier]).collect();
        assert_eq!(layouts.len(), 1);
    }
}
