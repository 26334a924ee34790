//! Groups streamed part results into whole days, released in day order
//!
//! Days finish on different threads in any order. A day is released once all
//! of its parts have arrived and every earlier day has been released.

use crate::executor::{SolverResult, WorkItem};
use chrono::TimeDelta;
use std::collections::BTreeMap;

/// Every result received for one day, sorted by part
pub struct DayReport {
    pub day: u8,
    pub parts: Vec<SolverResult>,
}

impl DayReport {
    /// Parse time of the day; `None` when its input was rejected
    pub fn parse_duration(&self) -> Option<TimeDelta> {
        self.parts.iter().find_map(|r| r.parse_duration)
    }

    pub fn failed(&self) -> usize {
        self.parts.iter().filter(|r| r.answer.is_err()).count()
    }
}

pub struct ResultAggregator {
    /// Parts still to arrive, per day
    outstanding: BTreeMap<u8, usize>,
    /// Results held until their day is released
    received: BTreeMap<u8, Vec<SolverResult>>,
    expected: usize,
}

impl ResultAggregator {
    /// Expect every part of every work item
    pub fn new(work_items: &[WorkItem]) -> Self {
        let outstanding: BTreeMap<u8, usize> = work_items
            .iter()
            .map(|w| (w.day, w.parts.clone().count()))
            .collect();
        let expected = outstanding.values().sum();

        Self {
            outstanding,
            received: BTreeMap::new(),
            expected,
        }
    }

    /// Number of part results expected in total
    pub fn expected_parts(&self) -> usize {
        self.expected
    }

    /// Record a result and return the days it completes, in day order
    pub fn add(&mut self, result: SolverResult) -> Vec<DayReport> {
        let day = result.day;
        match self.outstanding.get_mut(&day) {
            Some(remaining) => *remaining = remaining.saturating_sub(1),
            None => log::warn!("unexpected result for day {} part {}", day, result.part),
        }
        self.received.entry(day).or_default().push(result);

        let mut ready = Vec::new();
        while let Some((&day, &0)) = self.outstanding.first_key_value() {
            self.outstanding.pop_first();
            ready.push(self.release(day));
        }
        ready
    }

    /// Release whatever is still held, incomplete days included
    pub fn drain(&mut self) -> Vec<DayReport> {
        let days: Vec<u8> = self.received.keys().copied().collect();
        days.into_iter().map(|day| self.release(day)).collect()
    }

    /// Check if every expected part has been received
    pub fn is_complete(&self) -> bool {
        self.outstanding.values().all(|&remaining| remaining == 0)
    }

    fn release(&mut self, day: u8) -> DayReport {
        let mut parts = self.received.remove(&day).unwrap_or_default();
        parts.sort_by_key(|r| r.part);
        DayReport { day, parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_result(day: u8, part: u8) -> SolverResult {
        SolverResult {
            day,
            part,
            answer: Ok(format!("{}_{}", day, part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    fn work(day: u8, parts: std::ops::RangeInclusive<u8>) -> WorkItem {
        WorkItem { day, parts }
    }

    fn parts_of(report: &DayReport) -> Vec<u8> {
        report.parts.iter().map(|r| r.part).collect()
    }

    #[test]
    fn test_day_released_when_its_parts_are_in() {
        let mut agg = ResultAggregator::new(&[work(5, 1..=2)]);
        assert_eq!(agg.expected_parts(), 2);

        assert!(agg.add(make_result(5, 2)).is_empty());
        let ready = agg.add(make_result(5, 1));

        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].day, 5);
        assert_eq!(parts_of(&ready[0]), vec![1, 2]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_later_day_waits_for_earlier_day() {
        let mut agg = ResultAggregator::new(&[work(5, 1..=2), work(10, 1..=2)]);

        assert!(agg.add(make_result(10, 1)).is_empty());
        assert!(agg.add(make_result(10, 2)).is_empty());
        assert!(agg.add(make_result(5, 1)).is_empty());

        let ready = agg.add(make_result(5, 2));
        assert_eq!(ready.iter().map(|r| r.day).collect::<Vec<_>>(), vec![5, 10]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_part_filter_counts_one_part_per_day() {
        let mut agg = ResultAggregator::new(&[work(5, 2..=2), work(10, 2..=2)]);
        assert_eq!(agg.expected_parts(), 2);

        let ready = agg.add(make_result(5, 2));
        assert_eq!(parts_of(&ready[0]), vec![2]);
    }

    #[test]
    fn test_drain_releases_incomplete_days() {
        let mut agg = ResultAggregator::new(&[work(5, 1..=2), work(10, 1..=2)]);

        agg.add(make_result(10, 2));
        agg.add(make_result(5, 1));

        let remaining = agg.drain();
        assert_eq!(remaining.iter().map(|r| r.day).collect::<Vec<_>>(), vec![5, 10]);
        assert_eq!(parts_of(&remaining[1]), vec![2]);
        assert!(!agg.is_complete());
    }

    #[test]
    fn test_report_parse_time_and_failures() {
        let mut rejected = make_result(5, 1);
        rejected.answer = Err(advent_solver::SolverError::NotFound(5));
        rejected.parse_duration = None;

        let report = DayReport {
            day: 5,
            parts: vec![rejected, make_result(5, 2)],
        };
        assert_eq!(report.failed(), 1);
        assert_eq!(report.parse_duration(), Some(TimeDelta::milliseconds(5)));
    }

    proptest! {
        /// Any arrival order releases each day once, whole and in order
        #[test]
        fn prop_any_arrival_order_releases_whole_days(
            order in Just((1u8..=25).flat_map(|day| [(day, 1u8), (day, 2u8)]).collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let items: Vec<_> = (1u8..=25).map(|day| work(day, 1..=2)).collect();
            let mut agg = ResultAggregator::new(&items);

            let mut released = Vec::new();
            for (day, part) in order {
                released.extend(agg.add(make_result(day, part)));
            }

            prop_assert!(agg.is_complete());
            prop_assert_eq!(released.len(), 25);
            prop_assert!(released.windows(2).all(|w| w[0].day < w[1].day));
            prop_assert!(released.iter().all(|r| parts_of(r) == vec![1, 2]));
        }
    }
}
