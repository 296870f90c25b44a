/*
layouts.rs

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

//! Save and restore the accepted layouts.
//!
//! The layouts are kept in memory while the pipelines run. Each save rewrites the
//! `layouts.json` file in the data directory before the new layouts become visible in memory,
//! so a failed write leaves both unchanged.
//! The saved object is a serialization of the list of [`StoredLayout`] objects in JSON format by
//! using [`serde`].

use log::debug;
use std::fs::{File, create_dir_all, rename};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::store::{LayoutStore, MemoryStore, StoreError, StoredLayout};
use crate::generator::pipeline::SolvedLayout;

/// Name of the file in the data directory.
pub const LAYOUTS_FILE: &str = "layouts.json";

/// Layout store saved in a JSON file.
pub struct JsonStore {
    /// Absolute path to the save file.
    save_file: PathBuf,

    memory: MemoryStore,
}

impl JsonStore {
    /// Create a [`JsonStore`] object and load the layouts already saved.
    ///
    /// The provided path is the directory where the layouts are saved. A missing save file
    /// gives an empty store.
    ///
    /// # Errors
    ///
    /// The method returns an error if the save file cannot be read or parsed.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let save_file: PathBuf = data_dir.join(LAYOUTS_FILE);
        debug!("Layouts file: {save_file:?}");

        let records: Vec<StoredLayout> = match File::open(&save_file) {
            Ok(file) => {
                let reader: BufReader<File> = BufReader::new(file);
                serde_json::from_reader(reader)?
            }
            Err(error) => match error.kind() {
                ErrorKind::NotFound => Vec::new(),
                _ => return Err(error.into()),
            },
        };
        debug!("{} layouts loaded", records.len());

        Ok(Self {
            save_file,
            memory: MemoryStore::from_records(records),
        })
    }

    /// Path to the save file.
    pub fn save_file(&self) -> &Path {
        &self.save_file
    }

    /// Replace the save file with the given records.
    ///
    /// The records are written to a temporary file that then replaces the save file.
    fn write(&self, records: &[StoredLayout]) -> Result<(), StoreError> {
        if let Some(dir) = self.save_file.parent() {
            create_dir_all(dir)?;
        }
        let tmp_file: PathBuf = self.save_file.with_extension("json.tmp");
        let file: File = File::create(&tmp_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;
        drop(writer);
        rename(&tmp_file, &self.save_file)?;
        debug!("{} layouts saved", records.len());
        Ok(())
    }
}

impl LayoutStore for JsonStore {
    fn exists(&self, formula_id: &str, layout: &str) -> Result<bool, StoreError> {
        self.memory.exists(formula_id, layout)
    }

    fn save(&self, solved: &SolvedLayout) -> Result<(), StoreError> {
        self.save_all(std::slice::from_ref(solved))
    }

    /// Write the file with the new layouts, then add them to memory.
    fn save_all(&self, layouts: &[SolvedLayout]) -> Result<(), StoreError> {
        self.memory.save_all_with(layouts, |records| self.write(records))
    }

    fn layouts(&self, formula_id: &str) -> Result<Vec<StoredLayout>, StoreError> {
        self.memory.layouts(formula_id)
    }
}
