//! Day 5: seed-to-location almanac
//!
//! Seeds are pushed through seven interval-translation stages; part 1 reads the
//! seed line as a list, part 2 as `(start, length)` pairs.

mod almanac;
mod ranges;

pub use almanac::{Almanac, Category, IntervalRule, MappingStage, StageMap};
pub use ranges::{RangeStrategy, SeedRange, brute_force_min_location, split_min_location};

use almanac::parse_number;
use advent_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use anyhow::{Context, anyhow};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(day = 5, tags = ["ranges", "parallel"])]
pub struct Day05;

impl AocParser for Day05 {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input)
    }
}

impl PartSolver<1> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .min_location()
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("no seeds listed"))
    }
}

impl PartSolver<2> for Day05 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ranges = seed_ranges(&shared.seeds)?;
        let strategy = RangeStrategy::configured();
        log::debug!("scanning {} seed ranges with {:?}", ranges.len(), strategy);

        strategy
            .min_location(shared, &ranges)
            .map(|location| location.to_string())
            .ok_or_else(|| SolveError::failed("seed ranges are all empty"))
    }
}

/// Read the seed line as `(start, length)` pairs
pub fn seed_ranges(seeds: &[u64]) -> Result<Vec<SeedRange>, SolveError> {
    if seeds.len() % 2 != 0 {
        return Err(SolveError::failed(format!(
            "seed ranges need an even number of values, found {}",
            seeds.len()
        )));
    }

    Ok(seeds
        .chunks_exact(2)
        .map(|pair| SeedRange::new(pair[0], pair[1]))
        .collect())
}

/// Parse `seeds: ...` followed by the seven map blocks in pipeline order
pub fn parse_almanac(input: &str) -> Result<Almanac, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let (line_no, seeds_line) = lines
        .next()
        .ok_or_else(|| ParseError::MissingData("seeds line".to_string()))?;
    let seeds = parse_seeds(seeds_line)
        .map_err(|e| invalid_format(line_no, e))?;

    let mut rules: [Vec<IntervalRule>; 7] = Default::default();
    for (stage, stage_rules) in MappingStage::PIPELINE.iter().zip(rules.iter_mut()) {
        let (line_no, header) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData(format!("{} map", stage)))?;
        let found = header
            .parse::<MappingStage>()
            .and_then(|found| {
                if found == *stage {
                    Ok(found)
                } else {
                    Err(anyhow!("expected {} map, found {} map", stage, found))
                }
            })
            .map_err(|e| invalid_format(line_no, e))?;

        // Rule lines run until the next header
        while let Some((line_no, line)) = lines.next_if(|(_, line)| !line.ends_with(':')) {
            let rule = line
                .parse::<IntervalRule>()
                .with_context(|| format!("in {} map", found))
                .map_err(|e| invalid_format(line_no, e))?;
            stage_rules.push(rule);
        }
    }

    if let Some((line_no, line)) = lines.next() {
        return Err(invalid_format(
            line_no,
            anyhow!("unexpected content after the last map: {:?}", line),
        ));
    }

    let almanac = Almanac::from_rules(seeds, rules);
    log::debug!(
        "parsed almanac: {} seed values, {} rules",
        almanac.seeds.len(),
        almanac.stages.iter().map(|s| s.rules.len()).sum::<usize>()
    );
    Ok(almanac)
}

fn parse_seeds(line: &str) -> anyhow::Result<Vec<u64>> {
    line.strip_prefix("seeds:")
        .ok_or_else(|| anyhow!("expected line to start with `seeds:`"))?
        .split_whitespace()
        .map(parse_number)
        .collect()
}

fn invalid_format(line_no: usize, e: anyhow::Error) -> ParseError {
    ParseError::InvalidFormat(format!("(line {}) {:#}", line_no, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use advent_solver::Solver;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_parse_example() {
        let almanac = parse_almanac(EXAMPLE).unwrap();

        assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
        assert_eq!(almanac.stages[0].rules.len(), 2);
        assert_eq!(almanac.stages[2].rules.len(), 4);
        assert_eq!(almanac.stages[6].stage.destination, Category::Location);
        assert_eq!(almanac.stages[6].rules[1], IntervalRule::new(56, 93, 4));
    }

    #[test]
    fn test_resolve_example_seeds() {
        let almanac = parse_almanac(EXAMPLE).unwrap();

        assert_eq!(almanac.resolve(79), 82);
        assert_eq!(almanac.resolve(14), 43);
        assert_eq!(almanac.resolve(55), 86);
        assert_eq!(almanac.resolve(13), 35);
        assert_eq!(almanac.resolve(82), 46);
    }

    #[test]
    fn test_example_answers() {
        let mut almanac = Day05::parse(EXAMPLE).unwrap();

        assert_eq!(Day05::solve_part(&mut almanac, 1).unwrap(), "35");
        assert_eq!(Day05::solve_part(&mut almanac, 2).unwrap(), "46");
    }

    #[test]
    fn test_both_strategies_on_example() {
        let almanac = parse_almanac(EXAMPLE).unwrap();
        let ranges = seed_ranges(&almanac.seeds).unwrap();

        assert_eq!(ranges, vec![SeedRange::new(79, 14), SeedRange::new(55, 13)]);
        assert_eq!(RangeStrategy::Split.min_location(&almanac, &ranges), Some(46));
        assert_eq!(RangeStrategy::BruteForce.min_location(&almanac, &ranges), Some(46));
    }

    #[test]
    fn test_odd_seed_count_fails_part_two_only() {
        let input = EXAMPLE.replace("seeds: 79 14 55 13", "seeds: 79 14 55");
        let mut almanac = Day05::parse(&input).unwrap();

        assert_eq!(Day05::solve_part(&mut almanac, 1).unwrap(), "43");
        assert!(matches!(
            Day05::solve_part(&mut almanac, 2),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_no_seeds() {
        let input = EXAMPLE.replace("seeds: 79 14 55 13", "seeds:");
        let mut almanac = Day05::parse(&input).unwrap();

        assert!(Day05::solve_part(&mut almanac, 1).is_err());
        assert!(Day05::solve_part(&mut almanac, 2).is_err());
    }

    #[test]
    fn test_bad_number_names_line_and_token() {
        let input = EXAMPLE.replace("37 52 2", "37 5x2 2");
        let err = parse_almanac(&input).unwrap_err().to_string();

        assert!(err.contains("line 9"), "{}", err);
        assert!(err.contains("5x2"), "{}", err);
        assert!(err.contains("soil-to-fertilizer"), "{}", err);
    }

    #[test]
    fn test_stage_out_of_order() {
        let input = EXAMPLE.replace("water-to-light", "light-to-water");
        let err = parse_almanac(&input).unwrap_err().to_string();

        assert!(err.contains("expected water-to-light map"), "{}", err);
    }

    #[test]
    fn test_missing_stage() {
        let cut = EXAMPLE.find("humidity-to-location").unwrap();
        let err = parse_almanac(&EXAMPLE[..cut]).unwrap_err();

        assert!(matches!(err, ParseError::MissingData(ref what) if what.contains("humidity-to-location")));
    }

    #[test]
    fn test_missing_seeds_prefix() {
        let input = EXAMPLE.replace("seeds:", "plants:");
        assert!(matches!(
            parse_almanac(&input),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(parse_almanac(""), Err(ParseError::MissingData(_))));
    }

    fn example_almanac() -> Almanac {
        parse_almanac(EXAMPLE).unwrap()
    }

    proptest! {
        /// Resolving is a pure function of the value and the tables
        #[test]
        fn prop_resolve_deterministic(seed in 0u64..200) {
            let almanac = example_almanac();
            prop_assert_eq!(almanac.resolve(seed), almanac.resolve(seed));
        }

        /// Values above every rule of every stage come out unchanged
        #[test]
        fn prop_unmatched_values_pass_through(seed in 1_000u64..1_000_000) {
            let almanac = example_almanac();
            prop_assert_eq!(almanac.resolve(seed), seed);
        }
    }
}
