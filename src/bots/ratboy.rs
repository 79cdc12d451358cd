use super::{Sweep, chebyshev, nearest_robot};
use crate::robot::{Chassis, MoveOrder, Robot};
use crate::types::{Direction, Position, RadarObject, WeaponType};

const MAX_STRIDE: i32 = 3;

/// Hammer brawler: closes in on whatever the radar last saw and swings when adjacent.
#[derive(Debug, Clone)]
pub struct Ratboy {
    chassis: Chassis,
    sweep: Sweep,
    target: Option<Position>,
    wander: Direction,
}

impl Ratboy {
    pub fn new() -> Self {
        Ratboy {
            chassis: Chassis::new(WeaponType::Hammer),
            sweep: Sweep::starting_at(Direction::East),
            target: None,
            wander: Direction::SouthEast,
        }
    }

    // Bounce off the board edge by reversing the heading
    fn next_wander(&mut self) -> Direction {
        let next = self.position().offset(self.wander, 1);
        let c = &self.chassis;
        let off_board =
            next.row < 0 || next.row >= c.board_height || next.col < 0 || next.col >= c.board_width;
        if off_board {
            let (dr, dc) = self.wander.step();
            let dr = if next.row < 0 || next.row >= c.board_height { -dr } else { dr };
            let dc = if next.col < 0 || next.col >= c.board_width { -dc } else { dc };
            self.wander = Direction::toward(dr, dc).unwrap_or(Direction::North);
        }
        self.wander
    }
}

impl Default for Ratboy {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for Ratboy {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> Option<Direction> {
        // Keep staring at a target once found
        match self.target {
            Some(t) => Direction::toward(t.row - self.position().row, t.col - self.position().col)
                .or_else(|| Some(self.sweep.advance())),
            None => Some(self.sweep.advance()),
        }
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        self.target = nearest_robot(results, self.position());
    }

    fn shot_location(&mut self) -> Option<Position> {
        self.target.filter(|&t| chebyshev(self.position(), t) == 1)
    }

    fn move_order(&mut self) -> MoveOrder {
        match self.target {
            Some(t) => {
                let here = self.position();
                match Direction::toward(t.row - here.row, t.col - here.col) {
                    Some(d) => MoveOrder::new(d, (chebyshev(here, t) - 1).clamp(1, MAX_STRIDE)),
                    None => MoveOrder::stay(),
                }
            }
            None => MoveOrder::new(self.next_wander(), 1),
        }
    }
}
