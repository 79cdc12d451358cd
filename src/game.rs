use crate::arena::Arena;
use crate::config::{self, ArenaConfig};
use crate::drive::{self, Halt};
use crate::radar;
use crate::registry::RobotRegistry;
use crate::render::Renderer;
use crate::robot::{Combatant, RobotStatus, count_living, living_at, occupant_at};
use crate::types::Cell;
use crate::weapons;
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one robot was left standing after `round`.
    Winner { index: usize, round: u32 },
    /// Rounds `0..=last_round` were played without a single survivor emerging.
    Timeout { last_round: u32 },
    NoRobots,
}

impl Outcome {
    /// Number of rounds that were fully processed.
    pub fn rounds_played(&self) -> u32 {
        match self {
            Outcome::Winner { round, .. } => round.saturating_add(1),
            Outcome::Timeout { last_round } => last_round.saturating_add(1),
            Outcome::NoRobots => 0,
        }
    }
}

/// Where the scheduler is in the round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    RoundStart,
    AgentTurn(usize),
    RoundEnd,
    Terminated(Outcome),
}

/// The Game owns the board, the roster and the random source, and is the only
/// thing that mutates them.
///
/// Robots are dropped with the game; the factories that built them are plain
/// functions held by the registry, which always outlives them.
pub struct Game {
    pub arena: Arena,
    pub roster: Vec<Combatant>,
    pub config: ArenaConfig,
    pub current_round: u32,
    phase: Phase,
    rng: ChaCha8Rng,
    pacing: Duration, // Pause after each round when watching live
}

impl Game {
    /// Builds the named robots and stages them for setup. Names that fail to
    /// build are skipped with a warning.
    pub fn new(config: ArenaConfig, registry: &RobotRegistry, names: &[String], seed: u64) -> Self {
        let arena = Arena::from_config(&config);
        info!("Arena created with {}x{} grid.", arena.height, arena.width);

        let mut roster = Vec::with_capacity(names.len());
        for name in names {
            match registry.build(name) {
                Ok(robot) => {
                    let glyph = config::ROBOT_GLYPHS[roster.len() % config::ROBOT_GLYPHS.len()];
                    crate::debug_robot!(glyph => "Loaded {}", name);
                    roster.push(Combatant::new(glyph, name.as_str(), robot));
                }
                Err(e) => warn!("Skipping robot: {}", e),
            }
        }
        info!("Loaded {} robots.", roster.len());

        Game {
            arena,
            roster,
            config,
            current_round: 0,
            phase: Phase::Setup,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pacing: Duration::from_millis(config::WATCH_LIVE_DELAY_MS),
        }
    }

    /// A game over a prepared board and roster, ready to play its first round.
    pub fn with_arena(config: ArenaConfig, arena: Arena, roster: Vec<Combatant>, seed: u64) -> Self {
        Game {
            arena,
            roster,
            config,
            current_round: 0,
            phase: Phase::RoundStart,
            rng: ChaCha8Rng::seed_from_u64(seed),
            pacing: Duration::from_millis(config::WATCH_LIVE_DELAY_MS),
        }
    }

    /// Overrides the pause between rounds used when `watch_live` is set.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Plays until the game terminates.
    pub fn run<W: Write>(&mut self, renderer: &mut Renderer<W>) -> io::Result<Outcome> {
        info!("Starting main loop...");
        loop {
            if let Some(outcome) = self.step(renderer)? {
                renderer.flush()?;
                info!("Game finished: {:?}", outcome);
                return Ok(outcome);
            }
        }
    }

    /// Advances the state machine by one transition.
    pub fn step<W: Write>(&mut self, renderer: &mut Renderer<W>) -> io::Result<Option<Outcome>> {
        self.phase = match self.phase {
            Phase::Setup => {
                self.setup();
                Phase::RoundStart
            }
            Phase::RoundStart => self.start_round(renderer)?,
            Phase::AgentTurn(i) if i < self.roster.len() => {
                self.take_turn(i, renderer)?;
                Phase::AgentTurn(i + 1)
            }
            Phase::AgentTurn(_) => Phase::RoundEnd,
            Phase::RoundEnd => self.end_round(renderer)?,
            Phase::Terminated(outcome) => return Ok(Some(outcome)),
        };
        Ok(None)
    }

    // Hazards first, then each robot on a free cell in load order
    fn setup(&mut self) {
        self.arena.place_obstacles(&self.config, &mut self.rng);

        let staged = std::mem::take(&mut self.roster);
        for mut combatant in staged {
            let occupied = self.roster.len();
            if self.arena.count(Cell::Empty) <= occupied {
                warn!("No free cell left for {}, leaving it out.", combatant.name);
                continue;
            }
            let roster = &self.roster;
            let start = self
                .arena
                .random_cell_where(&mut self.rng, |p| occupant_at(roster, p).is_none());
            combatant.robot.set_boundaries(self.arena.height, self.arena.width);
            combatant.robot.move_to(start);
            crate::debug_robot!(combatant.glyph => "{} starts at {}", combatant.name, start);
            self.roster.push(combatant);
        }
        info!("Placed {} robots.", self.roster.len());
    }

    // The board is drawn before the roster is checked, so an empty game
    // still shows the terrain it would have been played on.
    fn start_round<W: Write>(&mut self, renderer: &mut Renderer<W>) -> io::Result<Phase> {
        if self.current_round > self.config.max_rounds {
            renderer.timeout(self.config.max_rounds.saturating_add(1))?;
            return Ok(Phase::Terminated(Outcome::Timeout {
                last_round: self.config.max_rounds,
            }));
        }
        renderer.round(self.current_round, &self.arena, &self.roster)?;
        if self.roster.is_empty() {
            renderer.no_robots()?;
            return Ok(Phase::Terminated(Outcome::NoRobots));
        }
        crate::debug_round!(self.current_round => "{} robots alive", count_living(&self.roster));
        Ok(Phase::AgentTurn(0))
    }

    fn end_round<W: Write>(&mut self, renderer: &mut Renderer<W>) -> io::Result<Phase> {
        if count_living(&self.roster) == 1 {
            if let Some(index) = self.roster.iter().position(|c| c.is_alive()) {
                renderer.winner(&self.roster[index])?;
                info!(
                    "{} wins in round {}.",
                    self.roster[index].name, self.current_round
                );
                return Ok(Phase::Terminated(Outcome::Winner {
                    index,
                    round: self.current_round,
                }));
            }
        }

        self.current_round += 1;
        if self.config.watch_live {
            renderer.flush()?;
            crate::debug_round!(self.current_round => "Pausing {:?}", self.pacing);
            thread::sleep(self.pacing);
        }
        Ok(Phase::RoundStart)
    }

    /// One robot's turn: radar, then either a shot or a move.
    fn take_turn<W: Write>(&mut self, i: usize, renderer: &mut Renderer<W>) -> io::Result<()> {
        let glyph = self.roster[i].glyph;
        let round = self.current_round;

        match self.roster[i].robot.chassis().status() {
            RobotStatus::Destroyed => return renderer.robot_out(&self.roster[i]),
            RobotStatus::Immobilized => {
                crate::debug_robot!(glyph, round => "Stuck in a pit, can only scan and fire")
            }
            RobotStatus::Active => {}
        }
        renderer.robot_status(&self.roster[i])?;

        let origin = self.roster[i].position();
        let heading = self.roster[i].robot.radar_direction();
        let results = radar::scan(&self.arena, &self.roster, origin, heading);
        crate::debug_scan!(glyph, round => "Heading {:?}, {} sighting(s)", heading, results.len());
        self.roster[i].robot.process_radar_results(&results);
        renderer.radar(&self.roster, &results)?;

        match self.roster[i].robot.shot_location() {
            Some(target) => {
                let weapon = self.roster[i].robot.weapon();
                let struck = living_at(&self.roster, target).map(|k| &self.roster[k]);
                renderer.firing(weapon, target, struck)?;

                let report = weapons::fire(&mut self.arena, &mut self.roster, i, target, &mut self.rng);
                for hit in report.hits.iter().filter(|h| h.lethal) {
                    info!(
                        "{} destroyed {} with its {}.",
                        self.roster[i].name, self.roster[hit.victim].name, weapon
                    );
                }
            }
            None => {
                renderer.not_firing()?;
                let order = self.roster[i].robot.move_order();
                match order.heading() {
                    Some(direction) => {
                        let outcome = drive::drive(
                            &mut self.arena,
                            &mut self.roster,
                            i,
                            direction,
                            order.distance,
                            &mut self.rng,
                        );
                        crate::debug_drive!(
                            glyph, round =>
                            "{} -> {} ({} step(s), halted by {:?})",
                            outcome.start,
                            outcome.end,
                            outcome.steps_taken,
                            outcome.halted_by
                        );
                        if outcome.halted_by == Some(Halt::Destroyed) {
                            info!("{} burned up at {}.", self.roster[i].name, outcome.end);
                        }
                        renderer.moved(outcome.end)?;
                    }
                    None => renderer.not_moving()?,
                }
            }
        }
        renderer.turn_end()
    }
}
