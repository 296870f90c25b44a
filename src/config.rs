/*
config.rs

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

//! Application settings.
//!
//! The variant limits come from a JSON file that only needs to list the values to change. For
//! example, to accept bridge layouts with two solutions:
//!
//! ```json
//! { "bridge": { "required_solutions": 2 } }
//! ```

use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::generator::constraints::Constraints;

pub const APP_NAME: &str = "mazewright";

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 The Mazewright authors
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Number of worker threads for batch runs.
pub const DEFAULT_WORKERS: usize = 4;

/// Type of errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Return the variant limits.
///
/// Without a file, the compiled-in defaults are used.
///
/// # Errors
///
/// The function returns an error if the file cannot be read or is not valid.
pub fn load_constraints(file: Option<&Path>) -> Result<Constraints, ConfigError> {
    let Some(path) = file else {
        return Ok(Constraints::default());
    };
    debug!("Settings file: {path:?}");

    let f: File = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let constraints: Constraints =
        serde_json::from_reader(BufReader::new(f)).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Constraints: {constraints:?}");
    Ok(constraints)
}

/// Default directory for the layout file: `$XDG_DATA_HOME/mazewright`, or
/// `$HOME/.local/share/mazewright`, or the current directory.
pub fn default_data_dir() -> PathBuf {
    let base: Option<PathBuf> = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/share")));
    match base {
        Some(dir) => dir.join(APP_NAME),
        None => PathBuf::from("."),
    }
}
