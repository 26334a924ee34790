//! Printing of day reports and the run summary

use crate::aggregator::DayReport;
use crate::executor::SolverResult;
use chrono::TimeDelta;

/// A printed line and the stream it goes to
#[derive(Debug, PartialEq, Eq)]
pub enum Line {
    Out(String),
    Err(String),
}

/// Output formatter for day reports
///
/// Plain mode prints one bare answer per line. Verbose mode prints a header
/// per day with its parse time, then one labelled line per part.
pub struct OutputFormatter {
    verbose: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn print_day(&self, report: &DayReport) {
        for line in self.format_day(report) {
            match line {
                Line::Out(text) => println!("{}", text),
                Line::Err(text) => eprintln!("{}", text),
            }
        }
    }

    /// Lines for one day, failures routed to stderr
    pub fn format_day(&self, report: &DayReport) -> Vec<Line> {
        let mut lines = Vec::with_capacity(report.parts.len() + 1);

        if self.verbose {
            let parse = match report.parse_duration() {
                Some(d) => format!("parsed in {}", format_duration(d)),
                None => "input rejected".to_string(),
            };
            lines.push(Line::Out(format!("Day {:02} ({})", report.day, parse)));
        }

        lines.extend(report.parts.iter().map(|r| self.format_part(r)));
        lines
    }

    fn format_part(&self, result: &SolverResult) -> Line {
        match (&result.answer, self.verbose) {
            (Ok(answer), false) => Line::Out(answer.clone()),
            (Ok(answer), true) => Line::Out(format!(
                "  Part {}: {} (solve: {})",
                result.part,
                answer,
                format_duration(result.solve_duration)
            )),
            (Err(e), false) => Line::Err(format!(
                "Day {:02} Part {}: Error - {}",
                result.day, result.part, e
            )),
            (Err(e), true) => Line::Err(format!("  Part {}: Error - {}", result.part, e)),
        }
    }

    /// Print totals after all days; verbose only
    pub fn print_summary(&self, reports: &[DayReport]) {
        if !self.verbose {
            return;
        }

        let summary = Summary::from_reports(reports);
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Days: {} ({} rejected input)",
            summary.days, summary.rejected_days
        );
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let compute_secs = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!(
                "Speedup factor: {:.2}x",
                compute_secs / elapsed_time.as_secs_f64()
            );
        }
    }
}

/// Totals over every reported day
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    days: usize,
    rejected_days: usize,
    solved: usize,
    failed: usize,
    /// One parse per day, however many parts it has
    parse_time: TimeDelta,
    solve_time: TimeDelta,
}

impl Summary {
    fn from_reports(reports: &[DayReport]) -> Self {
        let parts = reports.iter().flat_map(|r| &r.parts);
        let failed: usize = reports.iter().map(DayReport::failed).sum();

        Self {
            days: reports.len(),
            rejected_days: reports
                .iter()
                .filter(|r| r.parse_duration().is_none())
                .count(),
            solved: parts.clone().count() - failed,
            failed,
            parse_time: reports.iter().filter_map(DayReport::parse_duration).sum(),
            solve_time: parts
                .filter(|r| r.answer.is_ok())
                .map(|r| r.solve_duration)
                .sum(),
        }
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Wall-clock counterpart of [`format_duration`]
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d)
        .map(format_duration)
        .unwrap_or_else(|_| "N/A".to_string())
}
