/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Generate the plain 3x2 mazes with one barrier, without saving them:
//!
//! ```text
//! $ mazewright generate -x 3 -y 2 -b 1 --dry-run
//! plain-3x2-e1-b1-s0: 3 accepted (120 candidates, 90 duplicates, 24 rejected, 3 unsolved)
//! ...
//! ```
//!
//! Solve a layout:
//!
//! ```text
//! $ mazewright solve -x 3 -y 2 endpoint_1_a,normal,endpoint_1_b,normal,normal,barrier
//! [0, 3, 4, 1, 2]
//! ```
//!
//! Process a list of formulas on four threads:
//!
//! ```text
//! $ cat formulas.json
//! [{"x": 3, "y": 3, "variant": "tunnel", "barriers": 1, "secondary": 1},
//!  {"x": 4, "y": 3, "variant": "bridge", "secondary": 1}]
//! $ mazewright batch formulas.json --workers 4
//! ```

use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use log::debug;
use rand::Rng;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mazewright::config::{self, COPYRIGHT_NOTICE, DEFAULT_WORKERS};
use mazewright::generator::constraints::Constraints;
use mazewright::generator::formula::{Formula, FormulaParameters, Variant};
use mazewright::generator::grid::Grid;
use mazewright::generator::layout::Layout;
use mazewright::generator::pipeline::{GenerationReport, Pipeline};
use mazewright::generator::solver::Solver;
use mazewright::generator::validity;
use mazewright::saver::layouts::JsonStore;
use mazewright::saver::store::{LayoutStore, StoredLayout};
use mazewright::worker::WorkerPool;

/// Generate grid mazes that have a unique solution.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// JSON file with the limits for each variant
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory where the accepted layouts are saved
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the mazes of a formula
    Generate {
        #[command(flatten)]
        formula: FormulaArgs,

        /// Do not save the accepted layouts
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Generate the mazes of all the formulas in a JSON file
    Batch {
        /// JSON file with a list of formulas
        file: PathBuf,

        /// Number of worker threads
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Do not save the accepted layouts
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Solve a layout given as a comma-separated list of squares
    Solve {
        /// Grid width
        #[arg(short = 'x', long)]
        width: usize,

        /// Grid height
        #[arg(short = 'y', long)]
        height: usize,

        /// Maze variant
        #[arg(value_enum, long, default_value_t = Variant::Plain)]
        variant: Variant,

        /// Squares, row by row (`endpoint_1_a,normal,barrier,...`)
        tokens: String,
    },

    /// List the saved layouts of a formula
    List {
        /// Formula key, such as `plain-3x2-e1-b1-s0`
        #[arg(short, long)]
        formula: String,
    },

    /// Show a random saved layout of a formula
    Sample {
        /// Formula key, such as `plain-3x2-e1-b1-s0`
        #[arg(short, long)]
        formula: String,
    },
}

#[derive(clap::Args)]
struct FormulaArgs {
    /// Grid width
    #[arg(short = 'x', long)]
    width: usize,

    /// Grid height
    #[arg(short = 'y', long)]
    height: usize,

    /// Maze variant
    #[arg(value_enum, long, default_value_t = Variant::Plain)]
    variant: Variant,

    /// Number of endpoint pairs
    #[arg(short, long, default_value_t = 1)]
    endpoints: usize,

    /// Number of barriers
    #[arg(short, long, default_value_t = 0)]
    barriers: usize,

    /// Number of bridges, tunnel pairs, or portal pairs
    #[arg(short, long, default_value_t = 0)]
    secondary: usize,
}

impl From<&FormulaArgs> for FormulaParameters {
    fn from(a: &FormulaArgs) -> Self {
        Self {
            x: a.width,
            y: a.height,
            variant: a.variant,
            endpoints: a.endpoints,
            barriers: a.barriers,
            secondary: a.secondary,
        }
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match process(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn process(args: &Args) -> Result<u8, Box<dyn Error>> {
    let constraints = Arc::new(config::load_constraints(args.config.as_deref())?);
    let data_dir: PathBuf = args.data_dir.clone().unwrap_or_else(config::default_data_dir);
    debug!("Data directory: {data_dir:?}");

    match &args.command {
        Command::Generate { formula, dry_run } => {
            let formula = Formula::new(formula.into(), &constraints)?;
            let pipeline = Pipeline::new(constraints, JsonStore::open(&data_dir)?);
            let report: GenerationReport = if *dry_run {
                pipeline.generate(&formula)?
            } else {
                pipeline.run(&formula)?
            };
            print_report(&report, true);
            Ok(0)
        }
        Command::Batch {
            file,
            workers,
            dry_run,
        } => batch(constraints, &data_dir, file, *workers, *dry_run),
        Command::Solve {
            width,
            height,
            variant,
            tokens,
        } => {
            let layout: Layout = Layout::parse(*width, *height, tokens)?;
            let grid: Grid = Grid::new(*variant, &layout)?;
            if let Err(reason) = validity::check(&grid) {
                println!("No solution: {reason}");
                return Ok(0);
            }
            let mut solver: Solver = Solver::new(&grid);
            let solutions = solver.solve(None);
            for s in &solutions {
                println!("{:?}", s.get());
            }
            println!(
                "{} solution(s), {} iterations, {}s",
                solutions.len(),
                solver.iteration,
                solver.duration
            );
            Ok(0)
        }
        Command::List { formula } => {
            let store = JsonStore::open(&data_dir)?;
            for r in store.layouts(formula)? {
                let dt: DateTime<Local> = DateTime::from(r.when);
                println!(
                    "{}  {}  ({} solution(s))",
                    dt.format("%Y-%m-%d %H:%M:%S"),
                    r.solved.layout.to_key(),
                    r.solved.solutions.len()
                );
            }
            Ok(0)
        }
        Command::Sample { formula } => {
            let store = JsonStore::open(&data_dir)?;
            let layouts: Vec<StoredLayout> = store.layouts(formula)?;
            if layouts.is_empty() {
                eprintln!("No saved layout for {formula}. Use the generate command first.");
                return Ok(1);
            }
            let i: usize = rand::rng().random_range(0..layouts.len());
            let r: &StoredLayout = &layouts[i];
            print!("{}", r.solved.layout);
            for s in &r.solved.solutions {
                println!("{:?}", s.get());
            }
            Ok(0)
        }
    }
}

/// Run all the formulas of the file, and return 1 if one of them failed.
fn batch(
    constraints: Arc<Constraints>,
    data_dir: &Path,
    file: &Path,
    workers: usize,
    dry_run: bool,
) -> Result<u8, Box<dyn Error>> {
    let reader: BufReader<File> = BufReader::new(File::open(file)?);
    let parameters: Vec<FormulaParameters> = serde_json::from_reader(reader)?;

    let mut code: u8 = 0;
    let mut formulas: Vec<Formula> = Vec::with_capacity(parameters.len());
    for p in parameters {
        match Formula::new(p, &constraints) {
            Ok(f) => formulas.push(f),
            Err(e) => {
                eprintln!("Skipping formula {p:?}: {e}");
                code = 1;
            }
        }
    }

    let pipeline = Arc::new(Pipeline::new(constraints, JsonStore::open(data_dir)?));
    for outcome in WorkerPool::new(workers).run(pipeline, formulas, dry_run) {
        match outcome.result {
            Ok(report) => print_report(&report, false),
            Err(e) => {
                eprintln!("{}: {e}", outcome.formula.key());
                code = 1;
            }
        }
    }
    Ok(code)
}

fn print_report(report: &GenerationReport, details: bool) {
    println!(
        "{}: {} accepted ({} candidates, {} duplicates, {} rejected, {} unsolved)",
        report.formula_id,
        report.accepted.len(),
        report.candidates,
        report.duplicates,
        report.rejected,
        report.unsolved
    );
    debug!(
        "{}: {} iterations in {}s",
        report.formula_id, report.iterations, report.duration
    );
    if details {
        for solved in &report.accepted {
            println!();
            print!("{}", solved.layout);
            for s in &solved.solutions {
                println!("{:?}", s.get());
            }
        }
    }
}
