//! 2023 solutions

pub mod day_10;
pub mod day_5;
