//! Loop tracing and enclosed-area counting over a normalized sketch

use super::sketch::{Coordinate, Direction, NormalizedSketch};
use std::collections::{HashSet, VecDeque};

/// The closed loop through the start tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeLoop {
    tiles: HashSet<Coordinate>,
    farthest: usize,
}

impl PipeLoop {
    /// Number of tiles on the loop
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.tiles.contains(&at)
    }

    /// Largest step count from the start reached by the breadth-first walk
    pub fn farthest_distance(&self) -> usize {
        self.farthest
    }

    /// Steps to the tile opposite the start, walking along the loop
    pub fn farthest_from_start(&self) -> usize {
        self.len() / 2
    }
}

/// Collect every tile connected to the start, breadth-first
pub fn trace_loop(sketch: &NormalizedSketch) -> PipeLoop {
    let start = sketch.start();
    let mut tiles = HashSet::from([start]);
    let mut queue = VecDeque::from([(start, 0usize)]);
    let mut farthest = 0;

    while let Some((at, distance)) = queue.pop_front() {
        farthest = farthest.max(distance);
        for next in sketch.connections(at) {
            if tiles.insert(next) {
                queue.push_back((next, distance + 1));
            }
        }
    }

    PipeLoop { tiles, farthest }
}

/// Count tiles strictly inside the loop.
///
/// Each row is scanned left to right; crossing a loop tile with a north port
/// (`|`, `L`, `J`) flips between outside and inside. Tiles not on the loop count
/// when the scan is inside, whatever is drawn on them.
pub fn enclosed_area(sketch: &NormalizedSketch, pipe_loop: &PipeLoop) -> usize {
    (0..sketch.height())
        .map(|y| {
            let mut inside = false;
            let mut count = 0;
            for x in 0..sketch.width() {
                let at = Coordinate::new(x, y);
                if pipe_loop.contains(at) {
                    if sketch
                        .pipe_at(at)
                        .is_some_and(|shape| shape.has_port(Direction::North))
                    {
                        inside = !inside;
                    }
                } else if inside {
                    count += 1;
                }
            }
            count
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::super::sketch::Sketch;
    use super::*;

    fn traced(input: &str) -> (NormalizedSketch, PipeLoop) {
        let sketch = input.parse::<Sketch>().unwrap().normalize().unwrap();
        let pipe_loop = trace_loop(&sketch);
        (sketch, pipe_loop)
    }

    #[test]
    fn test_square_loop() {
        let (sketch, pipe_loop) = traced(".....\n.S-7.\n.|.|.\n.L-J.\n.....");

        assert_eq!(pipe_loop.len(), 8);
        assert_eq!(pipe_loop.farthest_from_start(), 4);
        assert_eq!(pipe_loop.farthest_distance(), 4);
        assert!(pipe_loop.contains(Coordinate::new(3, 3)));
        assert!(!pipe_loop.contains(Coordinate::new(2, 2)));
        assert_eq!(enclosed_area(&sketch, &pipe_loop), 1);
    }

    #[test]
    fn test_junk_pipes_are_ignored() {
        let (sketch, pipe_loop) = traced("-L|F7\n7S-7|\nL|7||\n-L-J|\nL|-JF");

        assert_eq!(pipe_loop.len(), 8);
        assert!(!pipe_loop.contains(Coordinate::new(0, 0)));
        assert_eq!(enclosed_area(&sketch, &pipe_loop), 1);
    }

    #[test]
    fn test_smallest_loop_encloses_nothing() {
        let (sketch, pipe_loop) = traced("S7\nLJ");

        assert_eq!(pipe_loop.len(), 4);
        assert_eq!(pipe_loop.farthest_from_start(), 2);
        assert_eq!(enclosed_area(&sketch, &pipe_loop), 0);
    }

    #[test]
    fn test_tiles_between_parallel_pipes_are_outside() {
        let input = "\
..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........";
        let (sketch, pipe_loop) = traced(input);

        assert_eq!(pipe_loop.len(), 44);
        assert_eq!(enclosed_area(&sketch, &pipe_loop), 4);
        assert!(!pipe_loop.contains(Coordinate::new(4, 3)));
    }
}
