//! Radar sweep along one of the eight headings.
//!
//! A sweep is a full ray trace: every robot, wreck and hazard between the
//! origin and the board edge is reported, nearest first. Nothing along the ray
//! blocks it.

use crate::arena::Arena;
use crate::robot::{Combatant, occupant_at};
use crate::types::{Cell, Direction, Position, RadarKind, RadarObject};

/// Scans outward from `origin` along `direction`.
///
/// Returns an empty list when `direction` is `None`. The ray visits distances
/// `1..=max(height, width)` and stops at the first off-board cell. A robot in a
/// cell is reported as living or dead; otherwise a non-empty board marker is
/// reported as a hazard sighting.
pub fn scan(
    arena: &Arena,
    roster: &[Combatant],
    origin: Position,
    direction: Option<Direction>,
) -> Vec<RadarObject> {
    let Some(direction) = direction else {
        return Vec::new();
    };

    let max_dist = arena.height.max(arena.width);
    let mut results = Vec::new();

    for d in 1..=max_dist {
        let pos = origin.offset(direction, d);
        if !arena.is_valid_position(pos) {
            break;
        }

        if let Some(idx) = occupant_at(roster, pos) {
            let kind = if roster[idx].is_alive() {
                RadarKind::Robot
            } else {
                RadarKind::DeadRobot
            };
            results.push(RadarObject::new(kind, pos));
            continue;
        }

        let cell = arena.get_at(pos);
        if cell != Cell::Empty {
            results.push(RadarObject::new(RadarKind::Hazard(cell), pos));
        }
    }

    crate::debug_scan!(
        "Sweep from {} heading {:?} found {} object(s)",
        origin,
        direction,
        results.len()
    );
    results
}
