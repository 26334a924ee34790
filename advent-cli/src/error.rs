//! Error types for the CLI

use itertools::Itertools;
use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inputs that must exist before anything runs
    #[error("Missing {} input file(s): {}", .0.len(), join_paths(.0))]
    MissingInputs(Vec<PathBuf>),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] advent_solver::RegistrationError),

    /// One or more parts did not produce an answer
    #[error("{failed} of {total} part(s) failed")]
    Failed { failed: usize, total: usize },

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input read failed
    #[error("Input read failed for day {day}: {source}")]
    Input {
        day: u8,
        #[source]
        source: InputError,
    },

    /// The registry could not provide a solver
    #[error("Solver for day {day} unavailable: {source}")]
    Solver {
        day: u8,
        #[source]
        source: advent_solver::SolverError,
    },

    /// Channel send error
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Combine two Arc-wrapped errors into one, flattening `Multiple` on either side
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                let mut combined = v1.clone();
                combined.extend(v2.iter().cloned());
                combined
            }
            (_, ExecutorError::Multiple(v)) => {
                let mut combined = vec![first];
                combined.extend(v.iter().cloned());
                combined
            }
            (ExecutorError::Multiple(v), _) => {
                let mut combined = v.clone();
                combined.push(second);
                combined
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|path| path.display()).join(", ")
}

/// Input file errors
#[derive(Error, Debug)]
pub enum InputError {
    /// No input file for the day
    #[error("no input for day {day} at {}", .path.display())]
    Missing { day: u8, path: PathBuf },

    /// IO error
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(day: u8) -> ArcExecutorError {
        ExecutorError::Input {
            day,
            source: InputError::Missing {
                day,
                path: PathBuf::from(format!("day{:02}.txt", day)),
            },
        }
        .into()
    }

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn test_combine_flattens() {
        let two = ArcExecutorError::combine(single(1), single(2));
        assert_eq!(count(&two), 2);

        let three = ArcExecutorError::combine(two.clone(), single(3));
        assert_eq!(count(&three), 3);

        let four = ArcExecutorError::combine(single(4), three.clone());
        assert_eq!(count(&four), 4);

        let seven = ArcExecutorError::combine(four, three);
        assert_eq!(count(&seven), 7);
        assert_eq!(seven.to_string(), "Multiple errors occurred (7 total)");
    }

    #[test]
    fn test_combine_opt() {
        assert_eq!(count(&ArcExecutorError::combine_opt(None, single(5))), 1);
        assert_eq!(
            count(&ArcExecutorError::combine_opt(Some(single(5)), single(10))),
            2
        );
    }

    #[test]
    fn test_missing_inputs_message() {
        let err = CliError::MissingInputs(vec![
            PathBuf::from("inputs/day05.txt"),
            PathBuf::from("inputs/day10.txt"),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing 2 input file(s): inputs/day05.txt, inputs/day10.txt"
        );
    }

    #[test]
    fn test_input_error_reaches_cli_through_executor() {
        let err = CliError::from(single(10));

        match &err {
            CliError::Executor(e) => {
                assert!(matches!(e.inner(), ExecutorError::Input { day: 10, .. }))
            }
            other => panic!("expected an executor error, got {:?}", other),
        }
        assert_eq!(
            err.to_string(),
            "Input read failed for day 10: no input for day 10 at day10.txt"
        );
    }
}
