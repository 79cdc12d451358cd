use crate::config::ArenaConfig;
use crate::types::{Cell, Position};
use ::rand::Rng;

// Represents the game board: a height x width grid of terrain markers.
// Robots are tracked by their own positions; only hazards and wreckage live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>, // Row-major
}

impl Arena {
    pub fn new(height: i32, width: i32) -> Self {
        let height = height.max(0);
        let width = width.max(0);
        Arena {
            width,
            height,
            cells: vec![Cell::Empty; (height * width) as usize],
        }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.height, config.width)
    }

    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height && col >= 0 && col < self.width
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.is_valid(pos.row, pos.col)
    }

    // Out-of-bounds queries return Cell::Invalid
    pub fn get(&self, row: i32, col: i32) -> Cell {
        match self.index(row, col) {
            Some(i) => self.cells[i],
            None => Cell::Invalid,
        }
    }

    pub fn get_at(&self, pos: Position) -> Cell {
        self.get(pos.row, pos.col)
    }

    // Out-of-bounds writes are ignored
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if cell == Cell::Invalid {
            return;
        }
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    pub fn set_at(&mut self, pos: Position, cell: Cell) {
        self.set(pos.row, pos.col, cell);
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells currently holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Places the configured number of mounds, pits and flame traps, in that order.
    ///
    /// Each hazard goes on a uniformly sampled Empty cell. Placement stops with
    /// a warning once no Empty cell is left.
    pub fn place_obstacles<R: Rng>(&mut self, config: &ArenaConfig, rng: &mut R) {
        if self.cell_count() == 0 {
            log::warn!("Board has no cells, skipping hazard placement.");
            return;
        }
        log::info!(
            "Placing {} hazards: {} mounds, {} pits and {} flame traps...",
            config.hazard_count(),
            config.mounds,
            config.pits,
            config.flame_traps
        );

        for (count, cell) in [
            (config.mounds, Cell::Mound),
            (config.pits, Cell::Pit),
            (config.flame_traps, Cell::FlameTrap),
        ] {
            for placed in 0..count {
                if self.count(Cell::Empty) == 0 {
                    log::warn!(
                        "Board is full, {} of {} {:?} hazards not placed.",
                        count - placed,
                        count,
                        cell
                    );
                    return;
                }
                let pos = self.random_cell_where(rng, |_| true);
                self.set_at(pos, cell);
            }
        }
        log::info!("Obstacles placed.");
    }

    /// Samples uniformly random cells until one is Empty and accepted by `accept`.
    /// Loops forever if no such cell exists.
    pub fn random_cell_where<R, F>(&self, rng: &mut R, mut accept: F) -> Position
    where
        R: Rng,
        F: FnMut(Position) -> bool,
    {
        loop {
            let pos = Position::new(rng.gen_range(0..self.height), rng.gen_range(0..self.width));
            if self.get_at(pos) == Cell::Empty && accept(pos) {
                return pos;
            }
        }
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if self.is_valid(row, col) {
            Some((row * self.width + col) as usize)
        } else {
            None
        }
    }
}

// Default implementation for Arena
impl Default for Arena {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_board_is_empty() {
        let arena = Arena::new(4, 6);
        assert_eq!(arena.cell_count(), 24);
        for row in 0..4 {
            for col in 0..6 {
                assert_eq!(arena.get(row, col), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_get_returns_last_set() {
        let mut arena = Arena::new(5, 5);
        arena.set(1, 3, Cell::Mound);
        arena.set(1, 3, Cell::Pit);
        arena.set(4, 0, Cell::Dead);
        assert_eq!(arena.get(1, 3), Cell::Pit);
        assert_eq!(arena.get(4, 0), Cell::Dead);
        assert_eq!(arena.get(0, 0), Cell::Empty);
    }

    #[test]
    fn test_out_of_bounds_is_invalid_and_not_written() {
        let mut arena = Arena::new(3, 3);
        assert_eq!(arena.get(-1, 0), Cell::Invalid);
        assert_eq!(arena.get(0, 3), Cell::Invalid);
        assert_eq!(arena.get(3, 0), Cell::Invalid);
        arena.set(3, 3, Cell::Mound);
        arena.set(-1, -1, Cell::Mound);
        assert_eq!(arena.count(Cell::Mound), 0);
        assert!(!arena.is_valid(0, -1));
        assert!(arena.is_valid(2, 2));
    }

    #[test]
    fn test_invalid_marker_is_never_stored() {
        let mut arena = Arena::new(2, 2);
        arena.set(0, 0, Cell::Invalid);
        assert_eq!(arena.get(0, 0), Cell::Empty);
    }

    #[test]
    fn test_place_obstacles_marks_distinct_cells() {
        let config = ArenaConfig {
            width: 6,
            height: 5,
            mounds: 7,
            pits: 5,
            flame_traps: 6,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        arena.place_obstacles(&config, &mut rng);

        assert_eq!(arena.count(Cell::Mound), 7);
        assert_eq!(arena.count(Cell::Pit), 5);
        assert_eq!(arena.count(Cell::FlameTrap), 6);
        assert_eq!(arena.count(Cell::Empty), 30 - 18);
    }

    #[test]
    fn test_place_obstacles_can_fill_board() {
        let config = ArenaConfig {
            width: 3,
            height: 3,
            mounds: 9,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::from_config(&config);
        arena.place_obstacles(&config, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(arena.count(Cell::Mound), 9);
    }

    #[test]
    fn test_place_obstacles_stops_when_board_is_full() {
        let config = ArenaConfig {
            width: 2,
            height: 2,
            mounds: 3,
            pits: 3,
            ..ArenaConfig::default()
        };
        let mut arena = Arena::from_config(&config);
        arena.place_obstacles(&config, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(arena.count(Cell::Mound), 3);
        assert_eq!(arena.count(Cell::Pit), 1);
        assert_eq!(arena.count(Cell::Empty), 0);
    }

    #[test]
    fn test_placement_is_reproducible_for_a_seed() {
        let config = ArenaConfig {
            mounds: 4,
            pits: 4,
            flame_traps: 4,
            ..ArenaConfig::default()
        };
        let mut a = Arena::from_config(&config);
        let mut b = Arena::from_config(&config);
        a.place_obstacles(&config, &mut ChaCha8Rng::seed_from_u64(99));
        b.place_obstacles(&config, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_cell_where_respects_filter() {
        let mut arena = Arena::new(2, 2);
        arena.set(0, 0, Cell::Mound);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pos = arena.random_cell_where(&mut rng, |p| p != Position::new(1, 1));
        assert_eq!(arena.get_at(pos), Cell::Empty);
        assert_ne!(pos, Position::new(1, 1));
    }
}
