use std::path::Path;

use pendulum_rs::{PendulumConfig, PendulumError};
use serde::{Deserialize, Serialize};

use crate::ConsoleError;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub pendulum: PendulumConfig,
    /// Fixed step in seconds. `None` steps by wall-clock time between frames.
    pub time_step: Option<f64>,
    pub steps: usize,
    /// Print the angles once every this many steps.
    pub print_every: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            pendulum: PendulumConfig::default(),
            time_step: Some(1.0 / 60.0),
            steps: 600,
            print_every: 1,
        }
    }
}

impl ConsoleSettings {
    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        let string = std::fs::read_to_string(path)?;
        let settings: ConsoleSettings = serde_json::from_str(&string)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), PendulumError> {
        match self.time_step {
            Some(time_step) if !time_step.is_finite() || time_step < 0.0 => {
                Err(PendulumError::InvalidParameter {
                    name: "time_step",
                    value: time_step,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings: ConsoleSettings =
            serde_json::from_str(r#"{ "steps": 10, "time_step": null }"#).unwrap();

        assert_eq!(settings.steps, 10);
        assert_eq!(settings.time_step, None);
        assert_eq!(settings.print_every, 1);
        assert_eq!(settings.pendulum, PendulumConfig::default());
    }

    fn write_settings(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pendulum-console-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_settings() {
        let path = write_settings("valid", r#"{ "steps": 3, "time_step": 0.01 }"#);
        let res = ConsoleSettings::load(&path);
        std::fs::remove_file(&path).unwrap();

        let settings = res.unwrap();
        assert_eq!(settings.steps, 3);
        assert_eq!(settings.time_step, Some(0.01));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("pendulum-console-does-not-exist.json");
        assert!(matches!(ConsoleSettings::load(&path), Err(ConsoleError::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let path = write_settings("malformed", r#"{ "steps": "many" "#);
        let res = ConsoleSettings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(res, Err(ConsoleError::Json(_))));
    }

    #[test]
    fn test_load_rejects_bad_time_step() {
        let path = write_settings("negative", r#"{ "time_step": -0.5 }"#);
        let res = ConsoleSettings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            res,
            Err(ConsoleError::Pendulum(PendulumError::InvalidParameter {
                name: "time_step",
                ..
            }))
        ));

        let settings = ConsoleSettings {
            time_step: Some(f64::NAN),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
        assert!(ConsoleSettings::default().validate().is_ok());
    }
}
