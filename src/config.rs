use std::fs;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

pub const MIN_FLOORS: u8 = 1;
pub const MAX_FLOORS: u8 = 20;
pub const MIN_CARS: u8 = 1;
pub const MAX_CARS: u8 = 10;

const DEFAULT_FLOOR_TRAVEL_TIME_MS: u64 = 1800;
const DEFAULT_DOOR_TIME_MS: u64 = 2200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("number of floors {0} is outside [{MIN_FLOORS}, {MAX_FLOORS}]")]
    FloorsOutOfRange(u8),

    #[error("number of cars {0} is outside [{MIN_CARS}, {MAX_CARS}]")]
    CarsOutOfRange(u8),

    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct SimulationSettings {
    pub num_floors: u8,
    pub num_cars: u8,
    pub floor_travel_time_ms: u64,
    pub door_time_ms: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            num_floors: 5,
            num_cars: 2,
            floor_travel_time_ms: DEFAULT_FLOOR_TRAVEL_TIME_MS,
            door_time_ms: DEFAULT_DOOR_TIME_MS,
        }
    }
}

impl SimulationSettings {
    pub fn new(num_floors: u8, num_cars: u8) -> Self {
        SimulationSettings {
            num_floors,
            num_cars,
            ..Default::default()
        }
    }

    /// Bounds check for the configure operation. A violation is reported to
    /// the caller and the simulation is not started; re-configuring with
    /// legal bounds recovers fully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_floors < MIN_FLOORS || self.num_floors > MAX_FLOORS {
            return Err(ConfigError::FloorsOutOfRange(self.num_floors));
        }
        if self.num_cars < MIN_CARS || self.num_cars > MAX_CARS {
            return Err(ConfigError::CarsOutOfRange(self.num_cars));
        }
        Ok(())
    }

    pub fn from_file(path: &Path, fallback_path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                println!("No settings file provided, using default settings...");
                fs::read_to_string(fallback_path)?
            }
        };
        let settings: SimulationSettings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn floor_travel_time(&self) -> Duration {
        Duration::from_millis(self.floor_travel_time_ms)
    }

    pub fn door_time(&self) -> Duration {
        Duration::from_millis(self.door_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(SimulationSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_floors() {
        let settings = SimulationSettings::new(21, 2);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FloorsOutOfRange(21))
        ));
        let settings = SimulationSettings::new(0, 2);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::FloorsOutOfRange(0))
        ));
    }

    #[test]
    fn rejects_out_of_range_cars() {
        let settings = SimulationSettings::new(5, 11);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::CarsOutOfRange(11))
        ));
        let settings = SimulationSettings::new(5, 0);
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::CarsOutOfRange(0))
        ));
    }

    #[test]
    fn parses_settings_json() {
        let settings: SimulationSettings = serde_json::from_str(
            r#"{"num_floors": 8, "num_cars": 3, "floor_travel_time_ms": 1500, "door_time_ms": 2500}"#,
        )
        .unwrap();
        assert_eq!(settings.num_floors, 8);
        assert_eq!(settings.num_cars, 3);
        assert_eq!(settings.floor_travel_time(), Duration::from_millis(1500));
        assert_eq!(settings.door_time(), Duration::from_millis(2500));
    }
}
