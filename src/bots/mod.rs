//! Built-in robots available by name from the registry.

mod flame_e_o;
mod lobber;
mod pot_shot;
mod ratboy;

pub use flame_e_o::FlameEO;
pub use lobber::Lobber;
pub use pot_shot::PotShot;
pub use ratboy::Ratboy;

use crate::registry::RobotFactory;
use crate::robot::Robot;
use crate::types::{Direction, Position, RadarKind, RadarObject};

/// Default roster, in load order.
pub const BUILTIN: [(&str, RobotFactory); 4] = [
    ("ratboy", build_ratboy),
    ("flame_e_o", build_flame_e_o),
    ("pot_shot", build_pot_shot),
    ("lobber", build_lobber),
];

fn build_ratboy() -> Option<Box<dyn Robot>> {
    Some(Box::new(Ratboy::new()))
}

fn build_flame_e_o() -> Option<Box<dyn Robot>> {
    Some(Box::new(FlameEO::new()))
}

fn build_pot_shot() -> Option<Box<dyn Robot>> {
    Some(Box::new(PotShot::new()))
}

fn build_lobber() -> Option<Box<dyn Robot>> {
    Some(Box::new(Lobber::new()))
}

/// Grid distance allowing diagonal steps.
pub(crate) fn chebyshev(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

/// Closest living robot among the sightings.
pub(crate) fn nearest_robot(results: &[RadarObject], from: Position) -> Option<Position> {
    results
        .iter()
        .filter(|o| o.kind == RadarKind::Robot)
        .map(|o| o.position)
        .min_by_key(|&p| chebyshev(from, p))
}

/// Rotates the radar one heading clockwise per round.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sweep {
    code: i32,
}

impl Sweep {
    pub(crate) fn starting_at(direction: Direction) -> Self {
        Sweep {
            code: direction.code(),
        }
    }

    pub(crate) fn advance(&mut self) -> Direction {
        let current = Direction::from_code(self.code).unwrap_or(Direction::North);
        self.code = self.code % 8 + 1;
        current
    }
}
