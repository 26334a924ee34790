//! Timed, type-erased solving of one day's parsed input

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};
use std::ops::RangeInclusive;

/// Answer to one part of a day, stamped with when it was computed
///
/// A result names its own day and part, so results solved on different
/// threads can be put back in order without extra bookkeeping.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Day the answer belongs to (1-25)
    pub day: u8,
    /// Part number within the day, starting at 1
    pub part: u8,
    /// The answer as it is printed
    pub answer: String,
    /// When solving started (UTC)
    pub solve_start: DateTime<Utc>,
    /// When solving finished (UTC)
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    /// Time spent in the part solver; parsing is not included
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One day's input, parsed once and shared by all of its parts
///
/// Parsing happens in [`SolverInstance::new`], so an instance always holds
/// valid data. Parts run one after another against the same
/// [`SharedData`](crate::AocParser::SharedData), so a later part can reuse
/// anything an earlier part cached there.
pub struct SolverInstance<'a, S: Solver> {
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` for `day`, recording when parsing started and ended
    ///
    /// # Errors
    ///
    /// Whatever [`ParseError`] the solver's parser reports for `input`.
    pub fn new(day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`]
///
/// The registry hands out `Box<dyn DynSolver>` so a runner can drive any day
/// without naming its solver type. Parts are numbered `1..=parts()`; any
/// other number fails with [`SolveError::PartOutOfRange`] before the solver
/// is called.
///
/// # Example
///
/// ```no_run
/// use advent_solver::DynSolver;
///
/// fn run(mut solver: Box<dyn DynSolver>) {
///     println!("Day {:02} parsed in {:?}", solver.day(), solver.parse_duration());
///
///     let parts = 1..=solver.parts();
///     for (part, outcome) in solver.solve_parts(parts) {
///         match outcome {
///             Ok(result) => println!("Part {}: {} (took {:?})", part, result.answer, result.duration()),
///             Err(e) => eprintln!("Part {}: {}", part, e),
///         }
///     }
/// }
/// ```
pub trait DynSolver {
    /// Solve one part and time it
    ///
    /// # Errors
    ///
    /// - [`SolveError::PartOutOfRange`] for part 0 or a part above [`parts`](DynSolver::parts)
    /// - Whatever the part solver itself returns
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// Solve each part of `parts` in ascending order against the shared data
    ///
    /// A failing part does not stop the ones after it. Every outcome is
    /// paired with the part it came from.
    fn solve_parts(
        &mut self,
        parts: RangeInclusive<u8>,
    ) -> Vec<(u8, Result<SolveResult, SolveError>)> {
        parts.map(|part| (part, self.solve(part))).collect()
    }

    /// When parsing started (UTC)
    fn parse_start(&self) -> DateTime<Utc>;

    /// When parsing finished (UTC)
    fn parse_end(&self) -> DateTime<Utc>;

    /// Day this instance was parsed for
    fn day(&self) -> u8;

    /// Number of parts the solver answers
    fn parts(&self) -> u8;

    /// Time spent parsing, paid once for every part of the day
    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<'a, S: SolverExt> DynSolver for SolverInstance<'a, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();

        Ok(SolveResult {
            day: self.day,
            part,
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
