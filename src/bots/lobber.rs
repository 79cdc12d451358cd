use super::{Sweep, chebyshev, nearest_robot};
use crate::config;
use crate::robot::{Chassis, MoveOrder, Robot};
use crate::types::{Direction, Position, RadarObject, WeaponType};

/// Grenadier. Lobs at any robot outside its own blast while stock lasts, then runs.
#[derive(Debug, Clone)]
pub struct Lobber {
    chassis: Chassis,
    sweep: Sweep,
    target: Option<Position>,
}

impl Lobber {
    pub fn new() -> Self {
        Lobber {
            chassis: Chassis::new(WeaponType::Grenade),
            sweep: Sweep::starting_at(Direction::West),
            target: None,
        }
    }
}

impl Default for Lobber {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for Lobber {
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
    }

    fn shot_location(&mut self) -> Option<Position> {
        if self.grenades() == 0 {
            return None;
        }
        self.target.filter(|&t| chebyshev(self.position(), t) > config::GRENADE_RADIUS)
    }

    fn move_order(&mut self) -> MoveOrder {
        let here = self.position();
        // Back away from whatever it saw
        self.target
            .and_then(|t| Direction::toward(here.row - t.row, here.col - t.col))
            .map(|d| MoveOrder::new(d, 1))
            .unwrap_or_else(MoveOrder::stay)
    }
}
