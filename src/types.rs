//! Shared value types: grid positions, headings, board markers, weapons and radar sightings.

use std::fmt;

/// A cell address on the board. Signed so that off-board addresses can be
/// expressed and rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Position reached after `distance` unit steps along `direction`.
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dr, dc) = direction.step();
        Position {
            row: self.row + dr * distance,
            col: self.col + dc * distance,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The eight compass headings used by radar and movement.
/// Codes run clockwise from 1 (North) to 8 (North-West).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Maps a heading code (1..=8) to a direction. 0 and anything else map to `None`.
    pub fn from_code(code: i32) -> Option<Direction> {
        match code {
            1..=8 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Direction::North => 1,
            Direction::NorthEast => 2,
            Direction::East => 3,
            Direction::SouthEast => 4,
            Direction::South => 5,
            Direction::SouthWest => 6,
            Direction::West => 7,
            Direction::NorthWest => 8,
        }
    }

    /// Unit step as (row delta, column delta). Row grows southwards.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Heading whose unit step matches the sign of (dr, dc), if any.
    pub fn toward(dr: i32, dc: i32) -> Option<Direction> {
        let step = (dr.signum(), dc.signum());
        Self::ALL.into_iter().find(|d| d.step() == step)
    }
}

/// A board marker. Robots are not stored in the grid; only terrain and wreckage are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Mound,
    Pit,
    FlameTrap,
    Dead,
    /// Returned for out-of-bounds queries; never stored.
    Invalid,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Mound => 'M',
            Cell::Pit => 'P',
            Cell::FlameTrap => 'F',
            Cell::Dead => 'X',
            Cell::Invalid => '?',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponType {
    Railgun,
    Hammer,
    Grenade,
    Flamethrower,
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeaponType::Railgun => "railgun",
            WeaponType::Hammer => "hammer",
            WeaponType::Grenade => "grenade",
            WeaponType::Flamethrower => "flamethrower",
        };
        f.write_str(name)
    }
}

/// What a radar ray saw in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarKind {
    Robot,
    DeadRobot,
    Hazard(Cell),
}

impl RadarKind {
    pub fn symbol(self) -> char {
        match self {
            RadarKind::Robot => 'R',
            RadarKind::DeadRobot => 'X',
            RadarKind::Hazard(cell) => cell.symbol(),
        }
    }
}

/// One sighting along a radar ray. Produced fresh on every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadarObject {
    pub kind: RadarKind,
    pub position: Position,
}

impl RadarObject {
    pub fn new(kind: RadarKind, position: Position) -> Self {
        RadarObject { kind, position }
    }
}
