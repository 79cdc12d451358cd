use crate::config;
use crate::types::*;

// Represents the possible states of a robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotStatus {
    Active,
    Immobilized, // Stepped into a pit; can still scan and fire
    Destroyed,
}

/// The mutable body every robot carries: where it is, how hurt it is and what it fights with.
///
/// The game reads and mutates robots only through this block and the
/// decision methods of [`Robot`]; health and armor are plain counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chassis {
    pub position: Position,
    pub health: i32,
    pub armor: i32, // Loses one point per hit; never feeds into damage
    pub movement_disabled: bool,
    pub weapon: WeaponType,
    pub grenades: u32,
    pub board_height: i32,
    pub board_width: i32,
}

impl Chassis {
    pub fn new(weapon: WeaponType) -> Self {
        Chassis {
            position: Position::default(),
            health: config::DEFAULT_INITIAL_HEALTH,
            armor: config::DEFAULT_INITIAL_ARMOR,
            movement_disabled: false,
            weapon,
            grenades: if weapon == WeaponType::Grenade {
                config::DEFAULT_GRENADES
            } else {
                0
            },
            board_height: config::DEFAULT_HEIGHT,
            board_width: config::DEFAULT_WIDTH,
        }
    }

    pub fn at(mut self, row: i32, col: i32) -> Self {
        self.position = Position::new(row, col);
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    pub fn with_grenades(mut self, grenades: u32) -> Self {
        self.grenades = grenades;
        self
    }

    pub fn status(&self) -> RobotStatus {
        if self.health <= 0 {
            RobotStatus::Destroyed
        } else if self.movement_disabled {
            RobotStatus::Immobilized
        } else {
            RobotStatus::Active
        }
    }
}

/// A robot's requested movement for the round. A missing direction or a
/// non-positive distance means it stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOrder {
    pub direction: Option<Direction>,
    pub distance: i32,
}

impl MoveOrder {
    pub fn new(direction: Direction, distance: i32) -> Self {
        MoveOrder {
            direction: Some(direction),
            distance,
        }
    }

    pub fn stay() -> Self {
        MoveOrder::default()
    }

    /// The heading to travel, if this order moves at all.
    pub fn heading(&self) -> Option<Direction> {
        self.direction.filter(|_| self.distance > 0)
    }
}

/// The contract every combatant implements.
///
/// Decision methods are called once per round, in order: `radar_direction`,
/// `process_radar_results`, `shot_location`, and `move_order` only when no shot
/// was taken. They must return promptly; the game waits on them.
pub trait Robot {
    fn chassis(&self) -> &Chassis;
    fn chassis_mut(&mut self) -> &mut Chassis;

    /// Heading to sweep with radar this round; `None` skips the scan.
    fn radar_direction(&mut self) -> Option<Direction>;

    /// Receives this round's sightings, nearest first.
    fn process_radar_results(&mut self, results: &[RadarObject]);

    /// Cell to fire at this round, or `None` to move instead.
    fn shot_location(&mut self) -> Option<Position>;

    fn move_order(&mut self) -> MoveOrder;

    fn position(&self) -> Position {
        self.chassis().position
    }

    fn health(&self) -> i32 {
        self.chassis().health
    }

    fn armor(&self) -> i32 {
        self.chassis().armor
    }

    fn is_alive(&self) -> bool {
        self.chassis().health > 0
    }

    fn weapon(&self) -> WeaponType {
        self.chassis().weapon
    }

    fn grenades(&self) -> u32 {
        self.chassis().grenades
    }

    fn can_move(&self) -> bool {
        !self.chassis().movement_disabled
    }

    fn take_damage(&mut self, amount: i32) {
        self.chassis_mut().health -= amount;
    }

    fn reduce_armor(&mut self, amount: i32) {
        let chassis = self.chassis_mut();
        chassis.armor = (chassis.armor - amount).max(0);
    }

    fn disable_movement(&mut self) {
        self.chassis_mut().movement_disabled = true;
    }

    fn move_to(&mut self, pos: Position) {
        self.chassis_mut().position = pos;
    }

    fn decrement_grenades(&mut self) {
        let chassis = self.chassis_mut();
        chassis.grenades = chassis.grenades.saturating_sub(1);
    }

    fn set_boundaries(&mut self, height: i32, width: i32) {
        let chassis = self.chassis_mut();
        chassis.board_height = height;
        chassis.board_width = width;
    }
}

/// A loaded robot together with the identity the game assigned to it.
pub struct Combatant {
    pub glyph: char,
    pub name: String,
    pub robot: Box<dyn Robot>,
}

impl Combatant {
    pub fn new(glyph: char, name: impl Into<String>, robot: Box<dyn Robot>) -> Self {
        Combatant {
            glyph,
            name: name.into(),
            robot,
        }
    }

    pub fn position(&self) -> Position {
        self.robot.position()
    }

    pub fn is_alive(&self) -> bool {
        self.robot.is_alive()
    }
}

impl std::fmt::Debug for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combatant")
            .field("glyph", &self.glyph)
            .field("name", &self.name)
            .field("chassis", self.robot.chassis())
            .finish()
    }
}

/// Index of the first robot standing on `pos`, living or dead.
pub fn occupant_at(roster: &[Combatant], pos: Position) -> Option<usize> {
    roster.iter().position(|c| c.position() == pos)
}

/// Index of the first living robot on `pos`.
pub fn living_at(roster: &[Combatant], pos: Position) -> Option<usize> {
    roster
        .iter()
        .position(|c| c.is_alive() && c.position() == pos)
}

pub fn count_living(roster: &[Combatant]) -> usize {
    roster.iter().filter(|c| c.is_alive()).count()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// A robot that replays scripted decisions, one per round.
    #[derive(Debug, Clone)]
    pub struct ScriptedRobot {
        pub chassis: Chassis,
        pub radar: Option<Direction>,
        pub shots: VecDeque<Option<Position>>,
        pub moves: VecDeque<MoveOrder>,
        pub seen: Vec<Vec<RadarObject>>,
    }

    impl ScriptedRobot {
        pub fn new(chassis: Chassis) -> Self {
            ScriptedRobot {
                chassis,
                radar: None,
                shots: VecDeque::new(),
                moves: VecDeque::new(),
                seen: Vec::new(),
            }
        }

        pub fn shooting(mut self, shots: impl IntoIterator<Item = Option<Position>>) -> Self {
            self.shots = shots.into_iter().collect();
            self
        }

        pub fn moving(mut self, moves: impl IntoIterator<Item = MoveOrder>) -> Self {
            self.moves = moves.into_iter().collect();
            self
        }

        pub fn scanning(mut self, direction: Direction) -> Self {
            self.radar = Some(direction);
            self
        }

        pub fn wrecked(mut self) -> Self {
            self.chassis.health = 0;
            self
        }
    }

    /// Wraps scripted robots into a roster, glyphs assigned from 'A' upwards.
    pub fn roster(robots: Vec<ScriptedRobot>) -> Vec<Combatant> {
        robots
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let glyph = (b'A' + i as u8) as char;
                Combatant::new(glyph, format!("bot{}", i), Box::new(r))
            })
            .collect()
    }

    /// A passive robot with the given weapon standing at (row, col).
    pub fn dummy(weapon: WeaponType, row: i32, col: i32) -> ScriptedRobot {
        ScriptedRobot::new(Chassis::new(weapon).at(row, col))
    }

    impl Robot for ScriptedRobot {
        fn chassis(&self) -> &Chassis {
            &self.chassis
        }

        fn chassis_mut(&mut self) -> &mut Chassis {
            &mut self.chassis
        }

        fn radar_direction(&mut self) -> Option<Direction> {
            self.radar
        }

        fn process_radar_results(&mut self, results: &[RadarObject]) {
            self.seen.push(results.to_vec());
        }

        fn shot_location(&mut self) -> Option<Position> {
            self.shots.pop_front().flatten()
        }

        fn move_order(&mut self) -> MoveOrder {
            self.moves.pop_front().unwrap_or_default()
        }
    }
}
