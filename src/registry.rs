//! Named robot factories.
//!
//! Robots are compiled in and looked up by name. Factories are plain function
//! pointers, so the registry never owns state a robot could outlive.

use crate::robot::Robot;
use log::debug;
use thiserror::Error;

/// Builds a fresh robot, or declines with `None`.
pub type RobotFactory = fn() -> Option<Box<dyn Robot>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no robot named {0:?} is registered")]
    UnknownRobot(String),
    #[error("factory for {0:?} did not produce a robot")]
    FactoryDeclined(String),
}

#[derive(Debug, Clone, Default)]
pub struct RobotRegistry {
    factories: Vec<(String, RobotFactory)>, // Registration order is load order
}

impl RobotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-filled with every robot in [`crate::bots`].
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for (name, factory) in crate::bots::BUILTIN {
            registry.register(name, factory);
        }
        registry
    }

    /// Adds `factory` under `name`, replacing any earlier entry of that name
    /// while keeping its place in the order.
    pub fn register(&mut self, name: impl Into<String>, factory: RobotFactory) {
        let name = name.into();
        match self.factories.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((name, factory)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn Robot>, RegistryError> {
        let (_, factory) = self
            .factories
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| RegistryError::UnknownRobot(name.to_string()))?;
        debug!("Building robot {:?}", name);
        factory().ok_or_else(|| RegistryError::FactoryDeclined(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::Chassis;
    use crate::robot::testing::ScriptedRobot;
    use crate::types::WeaponType;

    fn scripted() -> Option<Box<dyn Robot>> {
        Some(Box::new(ScriptedRobot::new(Chassis::new(WeaponType::Hammer))))
    }

    fn grenadier() -> Option<Box<dyn Robot>> {
        Some(Box::new(ScriptedRobot::new(Chassis::new(WeaponType::Grenade))))
    }

    fn broken() -> Option<Box<dyn Robot>> {
        None
    }

    #[test]
    fn test_build_known_robot() {
        let mut registry = RobotRegistry::new();
        registry.register("scripted", scripted);
        let robot = registry.build("scripted").unwrap();
        assert_eq!(robot.weapon(), WeaponType::Hammer);
    }

    #[test]
    fn test_unknown_and_declining_factories() {
        let mut registry = RobotRegistry::new();
        registry.register("broken", broken);
        assert_eq!(
            registry.build("ghost").err(),
            Some(RegistryError::UnknownRobot("ghost".to_string()))
        );
        assert_eq!(
            registry.build("broken").err(),
            Some(RegistryError::FactoryDeclined("broken".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = RobotRegistry::new();
        registry.register("a", scripted);
        registry.register("b", broken);
        registry.register("a", grenadier);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.build("a").unwrap().weapon(), WeaponType::Grenade);
    }

    #[test]
    fn test_builtin_roster_builds() {
        let registry = RobotRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["ratboy", "flame_e_o", "pot_shot", "lobber"]);
        assert!(registry.contains("lobber"));
        assert!(!registry.contains("ghost"));
        for name in registry.names() {
            assert!(registry.build(name).is_ok(), "{} failed to build", name);
        }
    }
}
