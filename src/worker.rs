/*
worker.rs

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

//! Process several formulas in parallel.
//!
//! The formulas wait in a FIFO channel. Each worker thread takes one formula, runs the whole
//! pipeline for it, sends the outcome back, and then takes the next formula.

use log::{debug, error};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::generator::formula::Formula;
use crate::generator::pipeline::{GenerationReport, Pipeline, PipelineError};
use crate::saver::store::LayoutStore;

/// Result of processing one formula.
#[derive(Debug)]
pub struct JobOutcome {
    pub formula: Formula,
    pub result: Result<GenerationReport, PipelineError>,
}

/// [`WorkerPool`] object.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create the object. At least one worker is used.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the pipeline for all the formulas and return the outcomes in completion order.
    ///
    /// When `dry_run` is `true`, the accepted layouts are not saved.
    /// The failure of a formula does not stop the other formulas.
    pub fn run<S: LayoutStore + 'static>(
        &self,
        pipeline: Arc<Pipeline<S>>,
        formulas: Vec<Formula>,
        dry_run: bool,
    ) -> Vec<JobOutcome> {
        let count: usize = formulas.len();
        let (job_sender, job_receiver) = async_channel::unbounded::<Formula>();
        let (result_sender, result_receiver) = async_channel::unbounded::<JobOutcome>();

        for formula in formulas {
            // The receiver is alive, the channel cannot be closed yet
            let _ = job_sender.send_blocking(formula);
        }
        // Workers stop once the queue is empty
        job_sender.close();

        let handles: Vec<JoinHandle<()>> = (0..self.workers.min(count))
            .map(|id| {
                let jobs = job_receiver.clone();
                let results = result_sender.clone();
                let pipeline = Arc::clone(&pipeline);
                thread::spawn(move || {
                    while let Ok(formula) = jobs.recv_blocking() {
                        debug!("Worker {id}: formula {}", formula.key());
                        let result = if dry_run {
                            pipeline.generate(&formula)
                        } else {
                            pipeline.run(&formula)
                        };
                        if results.send_blocking(JobOutcome { formula, result }).is_err() {
                            break;
                        }
                    }
                    debug!("Worker {id}: done");
                })
            })
            .collect();
        drop(result_sender);

        let mut outcomes: Vec<JobOutcome> = Vec::with_capacity(count);
        while let Ok(outcome) = result_receiver.recv_blocking() {
            outcomes.push(outcome);
        }

        for handle in handles {
            if handle.join().is_err() {
                error!("A worker thread panicked");
            }
        }
        outcomes
    }
}
