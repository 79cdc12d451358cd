//! Step-by-step movement resolution against terrain and other robots.

use crate::arena::Arena;
use crate::config;
use crate::robot::{Combatant, occupant_at};
use crate::types::{Cell, Direction, Position};
use rand::Rng;

/// Why a move ended before using its full distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    Edge,
    Mound,
    Pit,
    Occupied, // Another robot, living or dead
    Wreck,    // Dead-marker on the board
    Destroyed,
    Immobile, // Movement was already disabled
}

/// Result of resolving one move order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveOutcome {
    pub start: Position,
    pub end: Position,
    pub steps_taken: i32,
    pub trap_damage: Vec<i32>, // One roll per flame trap entered
    pub halted_by: Option<Halt>,
}

/// Moves robot `idx` up to `distance` cells along `direction`.
///
/// Each step looks at the next cell:
/// - off-board, another robot or a wreck: stop where we are
/// - Empty: enter and keep going
/// - Mound: stop without entering
/// - Pit: enter, lose mobility for good, stop
/// - FlameTrap: enter, take 30-50 damage and one armor point, keep going.
///   The trap is spent and the cell becomes Empty; a robot killed there
///   leaves a dead-marker instead.
///
/// The robot's position is written once, after the last accepted step.
pub fn drive<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    idx: usize,
    direction: Direction,
    distance: i32,
    rng: &mut R,
) -> DriveOutcome {
    let start = roster[idx].position();
    let mut outcome = DriveOutcome {
        start,
        end: start,
        steps_taken: 0,
        trap_damage: Vec::new(),
        halted_by: None,
    };

    if !roster[idx].robot.can_move() {
        outcome.halted_by = Some(Halt::Immobile);
        return outcome;
    }

    let mut current = start;
    for _ in 0..distance {
        let next = current.offset(direction, 1);
        if !arena.is_valid_position(next) {
            outcome.halted_by = Some(Halt::Edge);
            break;
        }
        if occupant_at(roster, next).is_some_and(|other| other != idx) {
            outcome.halted_by = Some(Halt::Occupied);
            break;
        }

        match arena.get_at(next) {
            Cell::Empty => {
                current = next;
                outcome.steps_taken += 1;
            }
            Cell::Mound => {
                outcome.halted_by = Some(Halt::Mound);
                break;
            }
            Cell::Pit => {
                current = next;
                outcome.steps_taken += 1;
                roster[idx].robot.disable_movement();
                crate::debug_drive!(roster[idx].glyph => "Fell into pit at {}", next);
                outcome.halted_by = Some(Halt::Pit);
                break;
            }
            Cell::FlameTrap => {
                current = next;
                outcome.steps_taken += 1;
                let (lo, hi) = config::FLAME_TRAP_DAMAGE;
                let damage = rng.gen_range(lo..=hi);
                let robot = &mut roster[idx].robot;
                robot.take_damage(damage);
                robot.reduce_armor(1);
                outcome.trap_damage.push(damage);
                arena.set_at(next, Cell::Empty);
                crate::debug_drive!(
                    roster[idx].glyph =>
                    "Burned by flame trap at {} for {} (health {})",
                    next,
                    damage,
                    roster[idx].robot.health()
                );
                if !roster[idx].is_alive() {
                    arena.set_at(next, Cell::Dead);
                    outcome.halted_by = Some(Halt::Destroyed);
                    break;
                }
            }
            Cell::Dead | Cell::Invalid => {
                outcome.halted_by = Some(Halt::Wreck);
                break;
            }
        }
    }

    roster[idx].robot.move_to(current);
    outcome.end = current;
    outcome
}
