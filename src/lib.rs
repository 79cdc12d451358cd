//! Turn-based robot combat on a square grid.
//!
//! Robots scan along one of eight headings, then either fire or move. Shots and
//! moves are resolved against board hazards and each other until a single robot
//! survives or the round limit runs out.

pub mod arena;
pub mod bots;
pub mod config;
pub mod drive;
pub mod game;
pub mod logging;
pub mod radar;
pub mod registry;
pub mod render;
pub mod robot;
pub mod types;
pub mod weapons;

pub use arena::Arena;
pub use config::{ArenaConfig, ConfigError};
pub use game::{Game, Outcome};
pub use registry::{RegistryError, RobotRegistry};
pub use render::Renderer;
pub use robot::{Chassis, Combatant, MoveOrder, Robot};
pub use types::{Cell, Direction, Position, RadarKind, RadarObject, WeaponType};
