//! Pipe sketch grid and start-shape inference

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// The six pipe pieces, each open towards exactly two directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeShape {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `L`
    NorthEast,
    /// `J`
    NorthWest,
    /// `7`
    SouthWest,
    /// `F`
    SouthEast,
}

impl PipeShape {
    pub const ALL: [PipeShape; 6] = [
        PipeShape::Vertical,
        PipeShape::Horizontal,
        PipeShape::SouthEast,
        PipeShape::NorthEast,
        PipeShape::NorthWest,
        PipeShape::SouthWest,
    ];

    pub fn ports(self) -> [Direction; 2] {
        use Direction::*;
        match self {
            PipeShape::Vertical => [North, South],
            PipeShape::Horizontal => [East, West],
            PipeShape::NorthEast => [North, East],
            PipeShape::NorthWest => [North, West],
            PipeShape::SouthWest => [South, West],
            PipeShape::SouthEast => [South, East],
        }
    }

    pub fn has_port(self, direction: Direction) -> bool {
        self.ports().contains(&direction)
    }

    pub fn symbol(self) -> char {
        match self {
            PipeShape::Vertical => '|',
            PipeShape::Horizontal => '-',
            PipeShape::NorthEast => 'L',
            PipeShape::NorthWest => 'J',
            PipeShape::SouthWest => '7',
            PipeShape::SouthEast => 'F',
        }
    }
}

impl fmt::Display for PipeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Pipe(PipeShape),
    Ground,
    Start,
}

impl TryFrom<char> for Tile {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            '|' => Tile::Pipe(PipeShape::Vertical),
            '-' => Tile::Pipe(PipeShape::Horizontal),
            'L' => Tile::Pipe(PipeShape::NorthEast),
            'J' => Tile::Pipe(PipeShape::NorthWest),
            '7' => Tile::Pipe(PipeShape::SouthWest),
            'F' => Tile::Pipe(PipeShape::SouthEast),
            '.' => Tile::Ground,
            'S' => Tile::Start,
            other => return Err(other),
        })
    }
}

/// Column `x`, row `y`, both from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SketchError {
    #[error("sketch is empty")]
    Empty,
    #[error("line {line}, column {column}: unexpected tile {found:?}")]
    UnknownTile {
        line: usize,
        column: usize,
        found: char,
    },
    #[error("line {line} has {found} tiles, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("no start tile `S` in sketch")]
    MissingStart,
    #[error("more than one start tile: {first} and {second}")]
    MultipleStarts {
        first: Coordinate,
        second: Coordinate,
    },
    #[error("no pipe shape fits the neighbors of start {0}")]
    NoStartShape(Coordinate),
    #[error("start {start} is ambiguous, it could be any of {candidates:?}")]
    AmbiguousStartShape {
        start: Coordinate,
        candidates: Vec<PipeShape>,
    },
}

/// Rectangular tile storage, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    fn tile(&self, at: Coordinate) -> Tile {
        self.tiles[at.y * self.width + at.x]
    }

    fn set(&mut self, at: Coordinate, tile: Tile) {
        self.tiles[at.y * self.width + at.x] = tile;
    }

    /// The adjacent coordinate towards `direction`, if it is inside the grid
    fn neighbor(&self, at: Coordinate, direction: Direction) -> Option<Coordinate> {
        let (x, y) = match direction {
            Direction::North => (at.x, at.y.checked_sub(1)?),
            Direction::South => (at.x, at.y + 1),
            Direction::East => (at.x + 1, at.y),
            Direction::West => (at.x.checked_sub(1)?, at.y),
        };
        (x < self.width && y < self.height).then_some(Coordinate { x, y })
    }

    /// Whether the tile next to `at` towards `direction` is a pipe opening back at `at`
    fn connects_back(&self, at: Coordinate, direction: Direction) -> bool {
        self.neighbor(at, direction)
            .is_some_and(|next| match self.tile(next) {
                Tile::Pipe(shape) => shape.has_port(direction.opposite()),
                Tile::Ground | Tile::Start => false,
            })
    }
}

/// A sketch as drawn, with the start tile's shape still unknown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sketch {
    grid: Grid,
    start: Coordinate,
}

impl FromStr for Sketch {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect();
        let rows = match rows.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(SketchError::Empty),
        };

        let width = rows[0].chars().count();
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut start: Option<Coordinate> = None;

        for (y, row) in rows.iter().enumerate() {
            let row_len = row.chars().count();
            if row_len != width {
                return Err(SketchError::Ragged {
                    line: y + 1,
                    expected: width,
                    found: row_len,
                });
            }

            for (x, c) in row.chars().enumerate() {
                let tile = Tile::try_from(c).map_err(|found| SketchError::UnknownTile {
                    line: y + 1,
                    column: x + 1,
                    found,
                })?;

                if tile == Tile::Start {
                    let here = Coordinate::new(x, y);
                    if let Some(first) = start {
                        return Err(SketchError::MultipleStarts {
                            first,
                            second: here,
                        });
                    }
                    start = Some(here);
                }
                tiles.push(tile);
            }
        }

        Ok(Sketch {
            grid: Grid {
                width,
                height: rows.len(),
                tiles,
            },
            start: start.ok_or(SketchError::MissingStart)?,
        })
    }
}

impl Sketch {
    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// Every shape whose two ports both meet a neighbor pipe opening back at the start
    pub fn start_shape_candidates(&self) -> Vec<PipeShape> {
        PipeShape::ALL
            .into_iter()
            .filter(|shape| {
                shape
                    .ports()
                    .iter()
                    .all(|&port| self.grid.connects_back(self.start, port))
            })
            .collect()
    }

    /// The one shape the start tile can have; zero or several fits is an error
    pub fn infer_start_shape(&self) -> Result<PipeShape, SketchError> {
        match self.start_shape_candidates()[..] {
            [shape] => Ok(shape),
            [] => Err(SketchError::NoStartShape(self.start)),
            ref candidates => Err(SketchError::AmbiguousStartShape {
                start: self.start,
                candidates: candidates.to_vec(),
            }),
        }
    }

    /// Replace the start tile with its inferred shape.
    ///
    /// Consumes the sketch, so inference runs exactly once per sketch.
    pub fn normalize(self) -> Result<NormalizedSketch, SketchError> {
        let start_shape = self.infer_start_shape()?;
        let mut grid = self.grid;
        grid.set(self.start, Tile::Pipe(start_shape));

        Ok(NormalizedSketch {
            grid,
            start: self.start,
            start_shape,
        })
    }
}

/// A sketch whose start tile has been rewritten to a concrete pipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSketch {
    grid: Grid,
    start: Coordinate,
    start_shape: PipeShape,
}

impl NormalizedSketch {
    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn start_shape(&self) -> PipeShape {
        self.start_shape
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn pipe_at(&self, at: Coordinate) -> Option<PipeShape> {
        match self.grid.tile(at) {
            Tile::Pipe(shape) => Some(shape),
            Tile::Ground | Tile::Start => None,
        }
    }

    /// Where the pipe at `at` leads: the neighbors behind its ports that open back.
    pub fn connections(&self, at: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.pipe_at(at)
            .into_iter()
            .flat_map(PipeShape::ports)
            .filter(move |&port| self.grid.connects_back(at, port))
            .filter_map(move |port| self.grid.neighbor(at, port))
    }

    /// Coordinates row by row, left to right
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.grid.height)
            .flat_map(move |y| (0..self.grid.width).map(move |x| Coordinate::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_are_distinct_and_symmetric() {
        for shape in PipeShape::ALL {
            let [a, b] = shape.ports();
            assert_ne!(a, b, "{}", shape);
            assert!(shape.has_port(a) && shape.has_port(b));
        }
        assert!(PipeShape::SouthEast.has_port(Direction::East));
        assert!(!PipeShape::SouthEast.has_port(Direction::North));
        assert_eq!(Direction::West.opposite(), Direction::East);
    }

    #[test]
    fn test_tile_from_char() {
        for shape in PipeShape::ALL {
            assert_eq!(Tile::try_from(shape.symbol()), Ok(Tile::Pipe(shape)));
        }
        assert_eq!(Tile::try_from('.'), Ok(Tile::Ground));
        assert_eq!(Tile::try_from('S'), Ok(Tile::Start));
        assert_eq!(Tile::try_from('x'), Err('x'));
    }

    #[test]
    fn test_infer_square_start() {
        let sketch: Sketch = ".....\n.S-7.\n.|.|.\n.L-J.\n.....".parse().unwrap();

        assert_eq!(sketch.start(), Coordinate::new(1, 1));
        assert_eq!(sketch.infer_start_shape(), Ok(PipeShape::SouthEast));
    }

    #[test]
    fn test_infer_start_on_border() {
        let sketch: Sketch = "7-F7-\n.FJ|7\nSJLL7\n|F--J\nLJ.LJ".parse().unwrap();

        assert_eq!(sketch.start(), Coordinate::new(0, 2));
        assert_eq!(sketch.infer_start_shape(), Ok(PipeShape::SouthEast));
    }

    #[test]
    fn test_infer_start_in_corner() {
        let sketch: Sketch = "S7\nLJ".parse().unwrap();
        assert_eq!(sketch.infer_start_shape(), Ok(PipeShape::SouthEast));
    }

    #[test]
    fn test_no_start_shape() {
        let sketch: Sketch = "...\n.S.\n...".parse().unwrap();
        assert_eq!(
            sketch.infer_start_shape(),
            Err(SketchError::NoStartShape(Coordinate::new(1, 1)))
        );
    }

    #[test]
    fn test_ambiguous_start_shape() {
        // Every neighbor opens towards S
        let sketch: Sketch = ".|.\n-S-\n.|.".parse().unwrap();
        match sketch.infer_start_shape() {
            Err(SketchError::AmbiguousStartShape { candidates, .. }) => {
                assert_eq!(candidates.len(), 6)
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_rewrites_start() {
        let sketch: Sketch = ".....\n.S-7.\n.|.|.\n.L-J.\n.....".parse().unwrap();
        let normalized = sketch.normalize().unwrap();

        assert_eq!(normalized.start_shape(), PipeShape::SouthEast);
        assert_eq!(
            normalized.pipe_at(Coordinate::new(1, 1)),
            Some(PipeShape::SouthEast)
        );
        assert!(
            normalized
                .coordinates()
                .all(|c| normalized.grid.tile(c) != Tile::Start)
        );
    }

    #[test]
    fn test_connections_require_matching_port() {
        let normalized = "S7.\n|L-\nLJ.".parse::<Sketch>().unwrap().normalize().unwrap();

        let mut from_corner: Vec<_> = normalized.connections(Coordinate::new(1, 1)).collect();
        from_corner.sort();
        assert_eq!(from_corner, vec![Coordinate::new(1, 0), Coordinate::new(2, 1)]);

        // East port of the `-` runs off the grid
        let from_edge: Vec<_> = normalized.connections(Coordinate::new(2, 1)).collect();
        assert_eq!(from_edge, vec![Coordinate::new(1, 1)]);

        let from_ground: Vec<_> = normalized.connections(Coordinate::new(2, 0)).collect();
        assert!(from_ground.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Sketch>(), Err(SketchError::Empty));
        assert_eq!("\n\n".parse::<Sketch>(), Err(SketchError::Empty));
        assert_eq!("...\n...".parse::<Sketch>(), Err(SketchError::MissingStart));
        assert_eq!(
            "S..\n..".parse::<Sketch>(),
            Err(SketchError::Ragged {
                line: 2,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "S.\n.x".parse::<Sketch>(),
            Err(SketchError::UnknownTile {
                line: 2,
                column: 2,
                found: 'x'
            })
        );
        assert_eq!(
            "S.\n.S".parse::<Sketch>(),
            Err(SketchError::MultipleStarts {
                first: Coordinate::new(0, 0),
                second: Coordinate::new(1, 1)
            })
        );
    }
}
