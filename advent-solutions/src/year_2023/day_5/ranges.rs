//! Minimum location over seed ranges
//!
//! Two strategies produce the same minimum:
//! - [`RangeStrategy::BruteForce`] resolves every seed, one rayon task per range
//! - [`RangeStrategy::Split`] pushes whole intervals through each stage, cutting
//!   them at rule boundaries

use super::almanac::{Almanac, StageMap};
use rayon::prelude::*;
use std::ops::Range;

/// `length` seeds starting at `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRange {
    pub start: u64,
    pub length: u64,
}

impl SeedRange {
    pub fn new(start: u64, length: u64) -> Self {
        Self { start, length }
    }

    /// The seeds of this range, `[start, start + length)`
    pub fn values(&self) -> Range<u64> {
        self.start..self.start.saturating_add(self.length)
    }

    fn span(&self) -> Option<Span> {
        let values = self.values();
        (!values.is_empty()).then(|| Span {
            start: values.start,
            end: values.end - 1,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeStrategy {
    /// Interval splitting through each stage
    #[default]
    Split,
    /// Resolve every seed of every range
    BruteForce,
}

impl RangeStrategy {
    /// Strategy the day 5 solver uses, selected by the `brute-force-ranges` feature
    pub fn configured() -> Self {
        if cfg!(feature = "brute-force-ranges") {
            RangeStrategy::BruteForce
        } else {
            RangeStrategy::Split
        }
    }

    /// Lowest location over all seeds of all ranges, `None` if every range is empty
    pub fn min_location(self, almanac: &Almanac, ranges: &[SeedRange]) -> Option<u64> {
        match self {
            RangeStrategy::Split => split_min_location(almanac, ranges),
            RangeStrategy::BruteForce => brute_force_min_location(almanac, ranges),
        }
    }
}

/// Scan every range on the current rayon pool, one task per range.
///
/// Each task keeps its own running minimum; the per-range minima are reduced once
/// all tasks have finished.
pub fn brute_force_min_location(almanac: &Almanac, ranges: &[SeedRange]) -> Option<u64> {
    ranges
        .par_iter()
        .with_max_len(1)
        .filter_map(|range| {
            let local = range.values().map(|seed| almanac.resolve(seed)).min();
            log::debug!(
                "seed range {}+{}: local minimum {:?}",
                range.start,
                range.length,
                local
            );
            local
        })
        .min()
}

/// Push the seed ranges through every stage as intervals
pub fn split_min_location(almanac: &Almanac, ranges: &[SeedRange]) -> Option<u64> {
    let spans: Vec<Span> = ranges.iter().filter_map(SeedRange::span).collect();

    let locations = almanac
        .stages
        .iter()
        .fold(spans, |spans, stage| stage.apply_spans(spans));
    log::debug!("seed ranges split into {} location intervals", locations.len());

    locations.iter().map(|span| span.start).min()
}

/// Inclusive interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    start: u64,
    end: u64,
}

impl StageMap {
    /// Interval form of [`StageMap::apply`].
    ///
    /// Rules are tried in input order and each one only sees the pieces no earlier
    /// rule claimed, which keeps first-match semantics for overlapping rules.
    fn apply_spans(&self, spans: Vec<Span>) -> Vec<Span> {
        let mut unmapped = spans;
        let mut mapped = Vec::with_capacity(unmapped.len());

        for rule in &self.rules {
            let (rule_start, rule_end) = (rule.source_start, rule.source_end());
            let mut rest = Vec::with_capacity(unmapped.len());

            for span in unmapped {
                if span.end < rule_start || span.start > rule_end {
                    rest.push(span);
                    continue;
                }

                let low = span.start.max(rule_start);
                let high = span.end.min(rule_end);
                if span.start < low {
                    rest.push(Span {
                        start: span.start,
                        end: low - 1,
                    });
                }
                if high < span.end {
                    rest.push(Span {
                        start: high + 1,
                        end: span.end,
                    });
                }
                mapped.push(Span {
                    start: rule.map(low),
                    end: rule.map(high),
                });
            }

            unmapped = rest;
        }

        mapped.extend(unmapped);
        mapped
    }
}
