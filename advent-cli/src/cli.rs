//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run days one after another, in day order
    Sequential,
    /// Run days concurrently on the thread pool; parts of a day stay sequential (default)
    #[default]
    Day,
}

/// Daily puzzle solver runner
#[derive(Parser, Debug)]
#[command(name = "advent", about = "Run the registered puzzle solvers", version)]
pub struct Args {
    /// Day to run (runs all registered days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `dayDD.txt` input files
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Input file for the selected day (requires --day)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential or day
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Print part labels, timings and a summary
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["advent"]).unwrap();

        assert_eq!(args.day, None);
        assert_eq!(args.input_dir, PathBuf::from("inputs"));
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert!(!args.verbose);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "advent",
            "--day",
            "10",
            "--part",
            "2",
            "--tags",
            "grid,ranges",
            "--input",
            "maze.txt",
            "--parallelize-by",
            "sequential",
            "--threads",
            "3",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.day, Some(10));
        assert_eq!(args.part, Some(2));
        assert_eq!(args.tags, vec!["grid", "ranges"]);
        assert_eq!(args.input, Some(PathBuf::from("maze.txt")));
        assert_eq!(args.parallelize_by, ParallelizeBy::Sequential);
        assert_eq!(args.threads, Some(3));
        assert!(args.verbose);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["advent", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["advent", "--day", "0"]).is_err());
        assert!(Args::try_parse_from(["advent", "--part", "3"]).is_err());
        assert!(Args::try_parse_from(["advent", "--parallelize-by", "part"]).is_err());
    }
}
