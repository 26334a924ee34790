//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use advent_solver::{DynSolver, ParseError, SolveError, SolveResult, SolverError, SolverRegistry};
use chrono::TimeDelta;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single part
pub struct SolverResult {
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    pub solve_duration: TimeDelta,
    /// Parse time of the day; `None` when parsing failed
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(
        registry: SolverRegistry,
        inputs: InputStore,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs,
                parallelize_by: config.parallelize_by,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Filter parts based on config.part_filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.sync_executor_config.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0,
            None => 1..=max_parts,
        }
    }

    /// Input paths the collected work items need but cannot find
    pub fn missing_inputs(&self) -> Vec<std::path::PathBuf> {
        self.sync_executor_config
            .inputs
            .missing(self.collect_work_items().iter().map(|w| w.day))
    }

    /// Execute all work items and send results to channel
    ///
    /// Both modes run inside the configured pool, so solvers that use rayon
    /// themselves share its threads.
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool
            .install(|| match sync_executor_config.parallelize_by {
                ParallelizeBy::Sequential => work_items
                    .iter()
                    .filter_map(|work| run_day(work, &tx, sync_executor_config).err())
                    .reduce(ArcExecutorError::combine),
                ParallelizeBy::Day => work_items
                    .into_par_iter()
                    .map(|work| run_day(&work, &tx, sync_executor_config).err())
                    .reduce_with(|err1, err2| match (err1, err2) {
                        (Some(err1), err2) => Some(ArcExecutorError::combine_opt(err2, err1)),
                        (None, err2) => err2,
                    })
                    .flatten(),
            })
            .map_or(Ok(()), Err)
    }
}

/// Read, parse and solve one day, sending one result per part
fn run_day(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let day = work.day;
    let input = sync_executor_config
        .inputs
        .read(day)
        .map_err(|source| ExecutorError::Input { day, source })?;

    let mut solver = match sync_executor_config.registry.create_solver(day, &input) {
        Ok(solver) => solver,
        Err(SolverError::ParseError(e)) => {
            log::warn!("day {} input rejected: {}", day, e);
            for part in work.parts.clone() {
                send(tx, parse_error_result(day, part, e.clone()))?;
            }
            return Ok(());
        }
        Err(source) => return Err(ExecutorError::Solver { day, source }.into()),
    };
    let parse_duration = solver.parse_duration();
    log::debug!("day {} parsed in {}", day, parse_duration);

    for (part, outcome) in solver.solve_parts(work.parts.clone()) {
        send(tx, part_result(day, part, parse_duration, outcome))?;
    }
    Ok(())
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Result for a part whose day failed to parse
fn parse_error_result(day: u8, part: u8, error: ParseError) -> SolverResult {
    SolverResult {
        day,
        part,
        answer: Err(SolverError::ParseError(error)),
        solve_duration: TimeDelta::zero(),
        parse_duration: None,
    }
}

/// Result for one solved (or failed) part of a parsed day
fn part_result(
    day: u8,
    part: u8,
    parse_duration: TimeDelta,
    outcome: Result<SolveResult, SolveError>,
) -> SolverResult {
    let (answer, solve_duration) = match outcome {
        Ok(result) => {
            let solve_duration = result.duration();
            (Ok(result.answer), solve_duration)
        }
        Err(e) => (Err(e.into()), TimeDelta::zero()),
    };

    SolverResult {
        day,
        part,
        answer,
        solve_duration,
        parse_duration: Some(parse_duration),
    }
}
