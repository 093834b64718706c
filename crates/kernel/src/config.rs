use std::path::Path;

use serde::{Deserialize, Serialize};
use skyreach_input::{InputState, KeyBindings};
use skyreach_terrain::{HeightField, WorldConfig, WorldError};

use crate::movement::{MovementController, MovementTuning};
use crate::vitals::VitalsRates;

/// Errors from loading or validating a session configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid world: {0}")]
    InvalidWorld(#[from] WorldError),
    #[error("movement.{field} = {value} must be {requirement}")]
    InvalidTuning {
        field: &'static str,
        value: f32,
        requirement: &'static str,
    },
    #[error("vitals.{pool} regen rate {rate} must be finite and non-negative")]
    InvalidRegen { pool: &'static str, rate: f32 },
    #[error("void surface {void_surface} sits above the recovery floor {respawn_floor}; falling off an island would never end")]
    UnrecoverableVoid { void_surface: f32, respawn_floor: f32 },
}

/// Everything needed to start a session. Every section defaults to the
/// shipped tuning, so a YAML file only lists what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub world: WorldConfig,
    pub movement: MovementTuning,
    pub vitals: VitalsRates,
    pub bindings: KeyBindings,
}

impl SessionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), islands = config.world.islands.len(), "loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.movement.validate()?;
        self.vitals.validate()?;
        let void_surface = self.world.void_floor + self.world.height_offset + self.movement.eye_height;
        let respawn_floor = self.world.height_offset - self.movement.respawn_depth;
        if void_surface >= respawn_floor {
            return Err(ConfigError::UnrecoverableVoid {
                void_surface,
                respawn_floor,
            });
        }
        Ok(())
    }

    pub fn height_field(&self) -> Result<HeightField, ConfigError> {
        Ok(HeightField::new(&self.world)?)
    }

    /// A fresh controller over this world's height field.
    pub fn controller(&self) -> Result<MovementController, ConfigError> {
        self.validate()?;
        Ok(MovementController::new(
            self.height_field()?,
            self.world.height_offset,
            self.movement,
            self.vitals,
        ))
    }

    pub fn input_state(&self) -> InputState {
        InputState::new(self.bindings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_mapping_yields_defaults() {
        let config = SessionConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let yaml = "movement:\n  walk_speed: 20.0\nvitals:\n  mana: 0.5\n";
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.movement.walk_speed, 20.0);
        assert_eq!(config.movement.dash_speed, 28.0);
        assert_eq!(config.vitals.mana, 0.5);
        assert_eq!(config.vitals.energy, 0.12);
        assert_eq!(config.world.islands.len(), 5);
    }

    #[test]
    fn custom_islands_and_bindings() {
        let yaml = r#"
world:
  islands:
    - id: 7
      name: Lone Rock
      center: [5.0, -5.0]
      radius: 10.0
      base_height: 4.0
      palette_index: 2
bindings:
  KeyI: forward
  Space: jump
"#;
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.world.islands.len(), 1);
        assert_eq!(config.world.islands[0].name, "Lone Rock");
        let mut input = config.input_state();
        assert!(input.on_press("KeyI").is_some());
        assert!(input.on_press("KeyW").is_none());
    }

    #[test]
    fn rejects_invalid_world() {
        let err = SessionConfig::from_yaml_str("world:\n  islands: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorld(WorldError::NoIslands)));
    }

    #[test]
    fn rejects_void_the_avatar_could_stand_on() {
        let err = SessionConfig::from_yaml_str("world:\n  void_floor: -10.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnrecoverableVoid { .. }));
    }

    #[test]
    fn rejects_negative_costs() {
        let err = SessionConfig::from_yaml_str("movement:\n  dash_cost: -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning { field: "dash_cost", .. }));
    }

    #[test]
    fn rejects_nan_eye_height() {
        let err = SessionConfig::from_yaml_str("movement:\n  eye_height: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning { field: "eye_height", .. }));
    }

    #[test]
    fn rejects_zero_attrition_period() {
        let err = SessionConfig::from_yaml_str("movement:\n  attrition_period: 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "attrition_period",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_regen() {
        let err = SessionConfig::from_yaml_str("vitals:\n  health: -0.02\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegen { pool: "health", .. }));
    }

    #[test]
    fn validated_config_never_panics_mid_frame() {
        let config = SessionConfig::from_yaml_str("movement:\n  dash_cost: 0.5\n").unwrap();
        let mut controller = config.controller().unwrap();
        let mut input = config.input_state();
        input.press(skyreach_input::Action::Dash);
        for _ in 0..120 {
            controller.step(1.0 / 60.0, &input, glam::Vec3::NEG_Z);
        }
        assert_eq!(controller.vitals().energy(), 0.0);
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = SessionConfig::from_yaml_str("movement: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "movement:\n  gravity: 20.0").unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.movement.gravity, 20.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn controller_starts_at_respawn_point() {
        let config = SessionConfig::default();
        let controller = config.controller().unwrap();
        assert_eq!(controller.player().position, config.movement.respawn_point);
        assert_eq!(controller.vitals().health(), 1.0);
    }
}
