/*
store.rs

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

//! Storage of the accepted layouts.
//!
//! The pipeline only talks to the [`LayoutStore`] trait.
//! [`MemoryStore`] keeps the layouts in memory and is the base of
//! [`super::layouts::JsonStore`], which also saves them in a file.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;
use thiserror::Error;

use crate::generator::pipeline::SolvedLayout;

/// Type of errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access the layout file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read or write the layouts: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("the layout store is unusable after a panic in another thread")]
    Poisoned,
}

/// Saved layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredLayout {
    #[serde(flatten)]
    pub solved: SolvedLayout,

    /// Time when the layout was saved.
    pub when: SystemTime,
}

/// Lookup and persistence of the accepted layouts.
///
/// Layouts are identified by their formula key and their serialized form
/// ([`crate::generator::layout::Layout::to_key`]).
pub trait LayoutStore: Send + Sync {
    /// Whether the layout is already saved for the formula.
    fn exists(&self, formula_id: &str, layout: &str) -> Result<bool, StoreError>;

    /// Save the layout and its solutions.
    fn save(&self, solved: &SolvedLayout) -> Result<(), StoreError>;

    /// Save several layouts, all of them or none.
    ///
    /// When the method returns an error, the store is left as it was before the call.
    fn save_all(&self, layouts: &[SolvedLayout]) -> Result<(), StoreError>;

    /// Return the saved layouts of the formula, oldest first.
    fn layouts(&self, formula_id: &str) -> Result<Vec<StoredLayout>, StoreError>;
}

#[derive(Debug, Default, Clone)]
struct StoreData {
    records: Vec<StoredLayout>,

    /// `(formula_id, layout)` of each record.
    keys: HashSet<(String, String)>,
}

impl StoreData {
    fn insert(&mut self, solved: &SolvedLayout, when: SystemTime) {
        let key: (String, String) = (solved.formula_id.clone(), solved.layout.to_key());
        if self.keys.insert(key) {
            self.records.push(StoredLayout {
                solved: solved.clone(),
                when,
            });
        } else {
            debug!("Layout already stored: {}", solved.layout.to_key());
        }
    }
}

/// Layout store kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    /// Create an empty [`MemoryStore`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`MemoryStore`] object from previously saved records.
    pub fn from_records(records: Vec<StoredLayout>) -> Self {
        let mut data = StoreData::default();
        for r in records {
            data.insert(&r.solved, r.when);
        }
        Self {
            data: Mutex::new(data),
        }
    }

    /// Return a copy of all the records.
    pub fn records(&self) -> Result<Vec<StoredLayout>, StoreError> {
        Ok(self.lock()?.records.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Add the layouts, but only if `persist` succeeds with the resulting records.
    ///
    /// The lock is held during `persist`, so the calls to `persist` never overlap.
    pub fn save_all_with<F>(&self, layouts: &[SolvedLayout], persist: F) -> Result<(), StoreError>
    where
        F: FnOnce(&[StoredLayout]) -> Result<(), StoreError>,
    {
        let mut data = self.lock()?;
        let mut updated: StoreData = data.clone();
        let now: SystemTime = SystemTime::now();
        for solved in layouts {
            updated.insert(solved, now);
        }
        persist(&updated.records)?;
        *data = updated;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>, StoreError> {
        self.data.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl LayoutStore for MemoryStore {
    fn exists(&self, formula_id: &str, layout: &str) -> Result<bool, StoreError> {
        Ok(self
            .lock()?
            .keys
            .contains(&(formula_id.to_string(), layout.to_string())))
    }

    fn save(&self, solved: &SolvedLayout) -> Result<(), StoreError> {
        self.lock()?.insert(solved, SystemTime::now());
        Ok(())
    }

    /// Save the layouts under a single lock, so that concurrent readers see all of them or none.
    fn save_all(&self, layouts: &[SolvedLayout]) -> Result<(), StoreError> {
        self.save_all_with(layouts, |_| Ok(()))
    }

    fn layouts(&self, formula_id: &str) -> Result<Vec<StoredLayout>, StoreError> {
        Ok(self
            .lock()?
            .records
            .iter()
            .filter(|r| r.solved.formula_id == formula_id)
            .cloned()
            .collect())
    }
}
