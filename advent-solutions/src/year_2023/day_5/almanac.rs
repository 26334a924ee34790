//! Almanac model: categories, stages, interval rules and the seed-to-location chain

use anyhow::{Context, anyhow, bail};
use std::fmt;
use std::str::FromStr;

/// A numbering space in the almanac, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Seed,
    Soil,
    Fertilizer,
    Water,
    Light,
    Temperature,
    Humidity,
    Location,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Seed => "seed",
            Category::Soil => "soil",
            Category::Fertilizer => "fertilizer",
            Category::Water => "water",
            Category::Light => "light",
            Category::Temperature => "temperature",
            Category::Humidity => "humidity",
            Category::Location => "location",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "seed" => Category::Seed,
            "soil" => Category::Soil,
            "fertilizer" => Category::Fertilizer,
            "water" => Category::Water,
            "light" => Category::Light,
            "temperature" => Category::Temperature,
            "humidity" => Category::Humidity,
            "location" => Category::Location,
            other => bail!("unknown category {:?}", other),
        })
    }
}

/// One `source-to-destination` step of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappingStage {
    pub source: Category,
    pub destination: Category,
}

impl MappingStage {
    const fn new(source: Category, destination: Category) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The seven stages from seed to location, in the order the almanac lists them
    pub const PIPELINE: [MappingStage; 7] = [
        MappingStage::new(Category::Seed, Category::Soil),
        MappingStage::new(Category::Soil, Category::Fertilizer),
        MappingStage::new(Category::Fertilizer, Category::Water),
        MappingStage::new(Category::Water, Category::Light),
        MappingStage::new(Category::Light, Category::Temperature),
        MappingStage::new(Category::Temperature, Category::Humidity),
        MappingStage::new(Category::Humidity, Category::Location),
    ];
}

impl fmt::Display for MappingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-to-{}", self.source, self.destination)
    }
}

impl FromStr for MappingStage {
    type Err = anyhow::Error;

    /// Parses a map header such as `seed-to-soil map:`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .trim()
            .strip_suffix("map:")
            .ok_or_else(|| anyhow!("expected a `<source>-to-<destination> map:` header"))?
            .trim_end();
        let (source, destination) = name
            .split_once("-to-")
            .ok_or_else(|| anyhow!("expected `-to-` in map name {:?}", name))?;

        Ok(MappingStage::new(source.parse()?, destination.parse()?))
    }
}

/// A `destination source length` line of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalRule {
    pub destination_start: u64,
    pub source_start: u64,
    pub length: u64,
}

impl IntervalRule {
    pub fn new(destination_start: u64, source_start: u64, length: u64) -> Self {
        Self {
            destination_start,
            source_start,
            length,
        }
    }

    /// Whether `value` lies in `[source_start, source_start + length]`.
    ///
    /// The upper bound is inclusive, so a rule covers `length + 1` values.
    pub fn contains(&self, value: u64) -> bool {
        value >= self.source_start && value - self.source_start <= self.length
    }

    /// Last contained source value (inclusive)
    pub fn source_end(&self) -> u64 {
        self.source_start.saturating_add(self.length)
    }

    /// Translate a contained value into the destination space
    pub fn map(&self, value: u64) -> u64 {
        self.destination_start + (value - self.source_start)
    }
}

impl FromStr for IntervalRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [destination_start, source_start, length] => {
                Ok(IntervalRule::new(destination_start, source_start, length))
            }
            _ => bail!("expected three numbers, found {}", values.len()),
        }
    }
}

pub(super) fn parse_number(token: &str) -> anyhow::Result<u64> {
    token
        .parse()
        .with_context(|| format!("invalid number {:?}", token))
}

/// All rules of one stage, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMap {
    pub stage: MappingStage,
    pub rules: Vec<IntervalRule>,
}

impl StageMap {
    /// Map `value` with the first rule containing it, or pass it through unchanged.
    ///
    /// Later rules are never consulted once one matches, even when they overlap.
    pub fn apply(&self, value: u64) -> u64 {
        self.rules
            .iter()
            .find(|rule| rule.contains(value))
            .map_or(value, |rule| rule.map(value))
    }
}

/// Parsed almanac: the seed line plus the seven stage maps in pipeline order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    pub seeds: Vec<u64>,
    pub stages: [StageMap; 7],
}

impl Almanac {
    /// Build an almanac from rules listed per pipeline stage
    pub fn from_rules(seeds: Vec<u64>, rules: [Vec<IntervalRule>; 7]) -> Self {
        let mut stage_rules = rules.into_iter();
        let stages = MappingStage::PIPELINE.map(|stage| StageMap {
            stage,
            rules: stage_rules.next().unwrap_or_default(),
        });
        Self { seeds, stages }
    }

    /// Push a seed number through all seven stages
    pub fn resolve(&self, seed: u64) -> u64 {
        self.stages
            .iter()
            .fold(seed, |value, stage| stage.apply(value))
    }

    /// Lowest location over the seed line read as a plain list
    pub fn min_location(&self) -> Option<u64> {
        self.seeds.iter().map(|&seed| self.resolve(seed)).min()
    }
}
