use super::{Sweep, nearest_robot};
use crate::robot::{Chassis, MoveOrder, Robot};
use crate::types::{Direction, Position, RadarObject, WeaponType};

// Rounds without a sighting before relocating
const PATIENCE: u32 = 8;

/// Railgun sniper. Sits still and sweeps; shoots the first robot it sees.
#[derive(Debug, Clone)]
pub struct PotShot {
    chassis: Chassis,
    sweep: Sweep,
    target: Option<Position>,
    idle_rounds: u32,
}

impl PotShot {
    pub fn new() -> Self {
        PotShot {
            chassis: Chassis::new(WeaponType::Railgun),
            sweep: Sweep::starting_at(Direction::North),
            target: None,
            idle_rounds: 0,
        }
    }

    fn toward_center(&self) -> Option<Direction> {
        let c = &self.chassis;
        Direction::toward(
            c.board_height / 2 - c.position.row,
            c.board_width / 2 - c.position.col,
        )
    }
}

impl Default for PotShot {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for PotShot {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> Option<Direction> {
        Some(self.sweep.advance())
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        self.target = nearest_robot(results, self.position());
        if self.target.is_some() {
            self.idle_rounds = 0;
        } else {
            self.idle_rounds += 1;
        }
    }

    fn shot_location(&mut self) -> Option<Position> {
        self.target
    }

    fn move_order(&mut self) -> MoveOrder {
        if self.idle_rounds < PATIENCE {
            return MoveOrder::stay();
        }
        self.idle_rounds = 0;
        match self.toward_center() {
            Some(d) => MoveOrder::new(d, 2),
            None => MoveOrder::new(self.sweep.advance(), 2),
        }
    }
}
