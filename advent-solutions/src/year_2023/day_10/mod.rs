//! Day 10: pipe maze
//!
//! Part 1 walks the loop through `S` and reports the farthest step count, part 2
//! counts the tiles the loop encloses.

mod sketch;
mod tracer;

pub use sketch::{
    Coordinate, Direction, NormalizedSketch, PipeShape, Sketch, SketchError, Tile,
};
pub use tracer::{PipeLoop, enclosed_area, trace_loop};

use advent_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(day = 10, tags = ["grid"])]
pub struct Day10;

/// Normalized sketch plus the loop, traced on first use
#[derive(Debug, Clone)]
pub struct PipeMaze {
    pub sketch: NormalizedSketch,
    pipe_loop: Option<PipeLoop>,
}

impl PipeMaze {
    pub fn new(sketch: NormalizedSketch) -> Self {
        Self {
            sketch,
            pipe_loop: None,
        }
    }

    pub fn pipe_loop(&mut self) -> &PipeLoop {
        self.traced().1
    }

    /// The sketch together with its loop, tracing the loop on first call
    pub fn traced(&mut self) -> (&NormalizedSketch, &PipeLoop) {
        let sketch = &self.sketch;
        let pipe_loop = self.pipe_loop.get_or_insert_with(|| {
            let pipe_loop = trace_loop(sketch);
            log::debug!(
                "traced loop of {} tiles from {}",
                pipe_loop.len(),
                sketch.start()
            );
            pipe_loop
        });
        (sketch, pipe_loop)
    }
}

impl From<SketchError> for ParseError {
    fn from(e: SketchError) -> Self {
        match e {
            SketchError::Empty | SketchError::MissingStart => ParseError::MissingData(e.to_string()),
            _ => ParseError::InvalidFormat(e.to_string()),
        }
    }
}

impl AocParser for Day10 {
    type SharedData<'a> = PipeMaze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let sketch = input.parse::<Sketch>()?.normalize()?;
        log::debug!(
            "{}x{} sketch, start {} is a `{}`",
            sketch.width(),
            sketch.height(),
            sketch.start(),
            sketch.start_shape()
        );
        Ok(PipeMaze::new(sketch))
    }
}

impl PartSolver<1> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.pipe_loop().farthest_from_start().to_string())
    }
}

impl PartSolver<2> for Day10 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (sketch, pipe_loop) = shared.traced();
        Ok(enclosed_area(sketch, pipe_loop).to_string())
    }
}
