use crate::arena::Arena;
use crate::robot::{Combatant, living_at};
use crate::types::{Position, RadarKind, RadarObject, WeaponType};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Board dump: one line per row, each cell followed by a space. A living
/// robot's glyph covers whatever marker lies underneath it.
pub fn board_string(arena: &Arena, roster: &[Combatant]) -> String {
    let mut out = String::with_capacity(((arena.width * 2 + 1) * arena.height) as usize);
    for row in 0..arena.height {
        for col in 0..arena.width {
            let pos = Position::new(row, col);
            let glyph = match living_at(roster, pos) {
                Some(i) => roster[i].glyph,
                None => arena.get_at(pos).symbol(),
            };
            out.push(glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// `R<glyph> at r,c` for robots, `<symbol> at r,c` for everything else,
/// joined with ` and `; `nothing` when the sweep was empty.
pub fn radar_summary(roster: &[Combatant], results: &[RadarObject]) -> String {
    if results.is_empty() {
        return "nothing".to_string();
    }
    let mut out = String::new();
    for (i, obj) in results.iter().enumerate() {
        if i > 0 {
            out.push_str(" and ");
        }
        match obj.kind {
            RadarKind::Robot => {
                let glyph = living_at(roster, obj.position).map(|k| roster[k].glyph);
                let _ = write!(out, "R{} at {}", glyph.unwrap_or('?'), obj.position);
            }
            kind => {
                let _ = write!(out, "{} at {}", kind.symbol(), obj.position);
            }
        }
    }
    out
}

/// Writes the console transcript of a game.
pub struct Renderer<W: Write> {
    out: W,
}

impl Renderer<io::Stdout> {
    pub fn stdout() -> Self {
        Renderer::new(io::stdout())
    }
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Renderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn round(&mut self, round: u32, arena: &Arena, roster: &[Combatant]) -> io::Result<()> {
        writeln!(self.out, "=========== Round {} ===========", round)?;
        writeln!(self.out, "{}", board_string(arena, roster))
    }

    pub fn robot_out(&mut self, robot: &Combatant) -> io::Result<()> {
        let pos = robot.position();
        writeln!(
            self.out,
            "{} {} ({},{}) - is out\n",
            robot.name, robot.glyph, pos.row, pos.col
        )
    }

    pub fn robot_status(&mut self, robot: &Combatant) -> io::Result<()> {
        let pos = robot.position();
        writeln!(
            self.out,
            "{} {} ({},{}) Health: {} Armor: {}",
            robot.name,
            robot.glyph,
            pos.row,
            pos.col,
            robot.robot.health(),
            robot.robot.armor()
        )
    }

    pub fn radar(&mut self, roster: &[Combatant], results: &[RadarObject]) -> io::Result<()> {
        writeln!(self.out, " radar scan returned {}", radar_summary(roster, results))
    }

    /// `struck` is the living robot that stood on the target cell when the shot left.
    pub fn firing(
        &mut self,
        weapon: WeaponType,
        target: Position,
        struck: Option<&Combatant>,
    ) -> io::Result<()> {
        write!(self.out, " firing {} at {}", weapon, target)?;
        if let Some(victim) = struck {
            write!(self.out, " Hits Robot {} at {}", victim.name, victim.position())?;
        }
        writeln!(self.out)
    }

    pub fn not_firing(&mut self) -> io::Result<()> {
        writeln!(self.out, " not firing")
    }

    pub fn moved(&mut self, to: Position) -> io::Result<()> {
        writeln!(self.out, " moving to ({},{})", to.row, to.col)
    }

    pub fn not_moving(&mut self) -> io::Result<()> {
        writeln!(self.out, " not moving")
    }

    pub fn turn_end(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn winner(&mut self, robot: &Combatant) -> io::Result<()> {
        writeln!(self.out, "Game Over! Winner found!")?;
        writeln!(self.out, "Winner: {} {}", robot.name, robot.glyph)
    }

    pub fn timeout(&mut self, rounds: u32) -> io::Result<()> {
        writeln!(self.out, "Game Over! No winner after {} rounds.", rounds)
    }

    pub fn no_robots(&mut self) -> io::Result<()> {
        writeln!(self.out, "No robots loaded. Exiting.")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::testing::{dummy, roster};
    use crate::types::Cell;

    fn transcript(f: impl FnOnce(&mut Renderer<Vec<u8>>) -> io::Result<()>) -> String {
        let mut renderer = Renderer::new(Vec::new());
        f(&mut renderer).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_board_shows_living_glyphs_over_markers() {
        let mut arena = Arena::new(2, 3);
        arena.set(0, 1, Cell::Mound);
        arena.set(1, 2, Cell::Pit);
        arena.set(1, 0, Cell::Dead);
        let roster = roster(vec![
            dummy(WeaponType::Hammer, 1, 2), // Standing in the pit
            dummy(WeaponType::Hammer, 0, 0).wrecked(),
        ]);
        assert_eq!(board_string(&arena, &roster), ". M . \nX . A \n");
    }

    #[test]
    fn test_radar_summary() {
        let roster = roster(vec![
            dummy(WeaponType::Hammer, 0, 0),
            dummy(WeaponType::Hammer, 0, 4),
        ]);
        let results = vec![
            RadarObject::new(RadarKind::Hazard(Cell::Mound), Position::new(0, 2)),
            RadarObject::new(RadarKind::Robot, Position::new(0, 4)),
            RadarObject::new(RadarKind::DeadRobot, Position::new(0, 6)),
        ];
        assert_eq!(
            radar_summary(&roster, &results),
            "M at 0,2 and RB at 0,4 and X at 0,6"
        );
        assert_eq!(radar_summary(&roster, &[]), "nothing");
    }

    #[test]
    fn test_turn_lines() {
        let roster = roster(vec![
            dummy(WeaponType::Hammer, 3, 4),
            dummy(WeaponType::Railgun, 3, 5),
        ]);
        let text = transcript(|r| {
            r.robot_status(&roster[0])?;
            r.firing(WeaponType::Hammer, Position::new(3, 5), Some(&roster[1]))?;
            r.firing(WeaponType::Grenade, Position::new(0, 0), None)?;
            r.not_firing()?;
            r.moved(Position::new(4, 4))?;
            r.not_moving()
        });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "bot0 A (3,4) Health: 100 Armor: 5");
        assert_eq!(lines[1], " firing hammer at 3,5 Hits Robot bot1 at 3,5");
        assert_eq!(lines[2], " firing grenade at 0,0");
        assert_eq!(lines[3], " not firing");
        assert_eq!(lines[4], " moving to (4,4)");
        assert_eq!(lines[5], " not moving");
    }

    #[test]
    fn test_round_header_and_out_line() {
        let arena = Arena::new(1, 2);
        let roster = roster(vec![dummy(WeaponType::Hammer, 0, 1).wrecked()]);
        let text = transcript(|r| {
            r.round(7, &arena, &roster)?;
            r.robot_out(&roster[0])
        });
        assert_eq!(
            text,
            "=========== Round 7 ===========\n. . \n\nbot0 A (0,1) - is out\n\n"
        );
    }
}
