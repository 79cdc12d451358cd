use super::{Sweep, chebyshev, nearest_robot};
use crate::config;
use crate::robot::{Chassis, MoveOrder, Robot};
use crate::types::{Direction, Position, RadarObject, WeaponType};

/// Flamethrower bot. Torches anything inside cone reach, otherwise creeps toward it.
#[derive(Debug, Clone)]
pub struct FlameEO {
    chassis: Chassis,
    sweep: Sweep,
    target: Option<Position>,
}

impl FlameEO {
    pub fn new() -> Self {
        FlameEO {
            chassis: Chassis::new(WeaponType::Flamethrower),
            sweep: Sweep::starting_at(Direction::South),
            target: None,
        }
    }
}

impl Default for FlameEO {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for FlameEO {
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
        self.target.filter(|&t| chebyshev(self.position(), t) <= config::FLAMETHROWER_DEPTH)
    }

    fn move_order(&mut self) -> MoveOrder {
        let here = self.position();
        self.target
            .and_then(|t| Direction::toward(t.row - here.row, t.col - here.col))
            .map(|d| MoveOrder::new(d, 2))
            .unwrap_or_else(MoveOrder::stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RadarKind;

    #[test]
    fn test_fires_only_within_reach() {
        let mut bot = FlameEO::new();
        bot.move_to(Position::new(0, 0));

        bot.process_radar_results(&[RadarObject::new(RadarKind::Robot, Position::new(4, 4))]);
        assert_eq!(bot.shot_location(), Some(Position::new(4, 4)));

        bot.process_radar_results(&[RadarObject::new(RadarKind::Robot, Position::new(5, 5))]);
        assert_eq!(bot.shot_location(), None);
        assert_eq!(bot.move_order(), MoveOrder::new(Direction::SouthEast, 2));
    }

    #[test]
    fn test_holds_position_without_target() {
        let mut bot = FlameEO::new();
        bot.process_radar_results(&[]);
        assert_eq!(bot.move_order().heading(), None);
    }
}
