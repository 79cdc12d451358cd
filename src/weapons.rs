//! Weapon resolution for the four weapon types.
//!
//! Every hit rolls fixed-range damage, strips one armor point and, when it is
//! lethal, leaves a dead-marker on the board where the victim stood. Dead
//! robots are never targeted again.

use crate::arena::Arena;
use crate::config;
use crate::robot::Combatant;
use crate::types::{Cell, Position, WeaponType};
use rand::Rng;

/// One robot struck by a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub victim: usize,
    pub position: Position,
    pub damage: i32,
    pub lethal: bool,
}

/// What a single `fire` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotReport {
    pub weapon: WeaponType,
    pub target: Position,
    pub fired: bool, // False for an empty grenade pouch or a railgun aimed at its own cell
    pub hits: Vec<Hit>,
}

impl ShotReport {
    fn new(weapon: WeaponType, target: Position) -> Self {
        ShotReport {
            weapon,
            target,
            fired: true,
            hits: Vec::new(),
        }
    }

    fn dud(mut self) -> Self {
        self.fired = false;
        self
    }
}

/// Fires robot `shooter`'s weapon at `target`.
pub fn fire<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    shooter: usize,
    target: Position,
    rng: &mut R,
) -> ShotReport {
    let weapon = roster[shooter].robot.weapon();
    crate::debug_weapon!(
        roster[shooter].glyph =>
        "Firing {} from {} at {}",
        weapon,
        roster[shooter].position(),
        target
    );

    let report = match weapon {
        WeaponType::Railgun => fire_railgun(arena, roster, shooter, target, rng),
        WeaponType::Hammer => fire_hammer(arena, roster, target, rng),
        WeaponType::Grenade => fire_grenade(arena, roster, shooter, target, rng),
        WeaponType::Flamethrower => fire_flamethrower(arena, roster, shooter, target, rng),
    };

    for hit in &report.hits {
        crate::debug_weapon!(
            roster[shooter].glyph =>
            "{} hit {} at {} for {}{}",
            weapon,
            roster[hit.victim].name,
            hit.position,
            hit.damage,
            if hit.lethal { " (destroyed)" } else { "" }
        );
    }
    report
}

/// Per-increment heading of a railgun slug, scaled so that the target is
/// reached after `max(|drow|, |dcol|)` increments. `None` when aiming at oneself.
///
/// Deltas are taken in `i64` so that any pair of `i32` positions is accepted.
pub fn railgun_heading(from: Position, to: Position) -> Option<(f64, f64, i64)> {
    let dr = i64::from(to.row) - i64::from(from.row);
    let dc = i64::from(to.col) - i64::from(from.col);
    let steps = dr.abs().max(dc.abs());
    if steps == 0 {
        return None;
    }
    Some((dr as f64 / steps as f64, dc as f64 / steps as f64, steps))
}

// The slug keeps flying to three times the target distance, hitting at most
// one robot per increment, and stops at the board edge.
fn fire_railgun<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    shooter: usize,
    target: Position,
    rng: &mut R,
) -> ShotReport {
    let mut report = ShotReport::new(WeaponType::Railgun, target);
    let origin = roster[shooter].position();
    let Some((step_r, step_c, steps)) = railgun_heading(origin, target) else {
        return report.dud();
    };

    // One axis advances a whole cell per increment, so the slug is off the
    // board after at most `height + width` increments.
    let reach = (steps * i64::from(config::RAILGUN_RANGE_FACTOR))
        .min(i64::from(arena.height) + i64::from(arena.width));
    let (mut cur_r, mut cur_c) = (f64::from(origin.row), f64::from(origin.col));
    for _ in 0..reach {
        cur_r += step_r;
        cur_c += step_c;
        let cell = Position::new(cur_r.round() as i32, cur_c.round() as i32);
        if !arena.is_valid_position(cell) {
            break;
        }

        let victim = roster
            .iter()
            .enumerate()
            .position(|(i, c)| i != shooter && c.is_alive() && c.position() == cell);
        if let Some(victim) = victim {
            let hit = strike(arena, roster, victim, config::RAILGUN_DAMAGE, rng);
            report.hits.push(hit);
        }
    }
    report
}

fn fire_hammer<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    target: Position,
    rng: &mut R,
) -> ShotReport {
    let mut report = ShotReport::new(WeaponType::Hammer, target);
    if let Some(victim) = crate::robot::living_at(roster, target) {
        report
            .hits
            .push(strike(arena, roster, victim, config::HAMMER_DAMAGE, rng));
    }
    report
}

fn fire_grenade<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    shooter: usize,
    target: Position,
    rng: &mut R,
) -> ShotReport {
    let mut report = ShotReport::new(WeaponType::Grenade, target);
    if roster[shooter].robot.grenades() == 0 {
        crate::debug_weapon!(roster[shooter].glyph => "Out of grenades");
        return report.dud();
    }
    roster[shooter].robot.decrement_grenades();

    // Clip the blast to the board; a block that misses it entirely is empty
    let r = config::GRENADE_RADIUS;
    let rows = target.row.saturating_sub(r).max(0)
        ..=target.row.saturating_add(r).min(arena.height - 1);
    let cols = target.col.saturating_sub(r).max(0)
        ..=target.col.saturating_add(r).min(arena.width - 1);
    for row in rows {
        for col in cols.clone() {
            let cell = Position::new(row, col);
            if let Some(victim) = crate::robot::living_at(roster, cell) {
                report
                    .hits
                    .push(strike(arena, roster, victim, config::GRENADE_DAMAGE, rng));
            }
        }
    }
    report
}

// Sweeps a cone anchored on the shooter: depth 1..=4 along the heading toward
// the target, one cell either side of it. Aiming at one's own cell collapses
// all twelve cone cells onto the shooter.
fn fire_flamethrower<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    shooter: usize,
    target: Position,
    rng: &mut R,
) -> ShotReport {
    let mut report = ShotReport::new(WeaponType::Flamethrower, target);
    let origin = roster[shooter].position();
    let dr = (i64::from(target.row) - i64::from(origin.row)).signum() as i32;
    let dc = (i64::from(target.col) - i64::from(origin.col)).signum() as i32;
    let (perp_r, perp_c) = (-dc, dr);

    for depth in 1..=config::FLAMETHROWER_DEPTH {
        for width in -config::FLAMETHROWER_HALF_WIDTH..=config::FLAMETHROWER_HALF_WIDTH {
            let cell = Position::new(
                origin.row + dr * depth + perp_r * width,
                origin.col + dc * depth + perp_c * width,
            );
            if !arena.is_valid_position(cell) {
                continue;
            }
            if let Some(victim) = crate::robot::living_at(roster, cell) {
                report
                    .hits
                    .push(strike(arena, roster, victim, config::FLAMETHROWER_DAMAGE, rng));
            }
        }
    }
    report
}

fn strike<R: Rng>(
    arena: &mut Arena,
    roster: &mut [Combatant],
    victim: usize,
    (lo, hi): (i32, i32),
    rng: &mut R,
) -> Hit {
    let damage = rng.gen_range(lo..=hi);
    let robot = &mut roster[victim].robot;
    robot.take_damage(damage);
    robot.reduce_armor(1);

    let position = robot.position();
    let lethal = !robot.is_alive();
    if lethal {
        arena.set_at(position, Cell::Dead);
    }
    Hit {
        victim,
        position,
        damage,
        lethal,
    }
}
