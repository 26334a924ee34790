//! advent - command-line runner for the registered puzzle solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import advent-solutions to link the solver plugins
use advent_solutions as _;

use advent_solver::RegistryBuilder;
use aggregator::{DayReport, ResultAggregator};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use input::InputStore;
use itertools::Itertools;
use output::OutputFormatter;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    log::info!("{:?}", config);

    let registry = build_registry(&config.tags)?;
    log::info!(
        "registered days: {}",
        registry.iter_info().map(|info| info.day).join(", ")
    );

    let mut inputs = InputStore::new(config.input_dir.clone());
    if let (Some(day), Some(file)) = (config.day_filter, &config.input_file) {
        inputs = inputs.with_file(day, file.clone());
    }

    let executor = Executor::new(registry, inputs, &config)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        log::warn!("no solvers match the given filters");
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    // Nothing runs unless every input is present
    let missing = executor.missing_inputs();
    if !missing.is_empty() {
        return Err(CliError::MissingInputs(missing));
    }

    run_executor(executor, config.verbose)
}

/// Run the executor and print each day as soon as it and every earlier day are done
///
/// A day whose input is rejected reports that error for each of its parts.
/// The other days still run and print; the run fails once everything is out.
fn run_executor(executor: Executor, verbose: bool) -> Result<(), CliError> {
    let work_items = executor.collect_work_items();
    let mut aggregator = ResultAggregator::new(&work_items);
    let total = aggregator.expected_parts();
    if verbose {
        println!("Running {} day(s), {} part(s)...", work_items.len(), total);
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(verbose);
    let mut reports = Vec::new();

    for result in rx {
        for report in aggregator.add(result) {
            formatter.print_day(&report);
            reports.push(report);
        }
    }

    if !aggregator.is_complete() {
        log::warn!("not all expected results were received");
    }
    for report in aggregator.drain() {
        formatter.print_day(&report);
        reports.push(report);
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&reports);

    let failed: usize = reports.iter().map(DayReport::failed).sum();
    if failed > 0 {
        return Err(CliError::Failed { failed, total });
    }
    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<advent_solver::SolverRegistry, CliError> {
    let builder = RegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
