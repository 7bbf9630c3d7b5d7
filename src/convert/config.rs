use std::sync::OnceLock;

use serde::Deserialize;

use super::error::Error;
use super::units::{EnergyUnit, conversion_factor};
use crate::io::{FRAME_KEYS, key_problem};
use crate::model::arrays::RESERVED_KEYS;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../resources/default.convert.toml");

static DEFAULT_CONFIG: OnceLock<ConvertConfig> = OnceLock::new();

/// Which keys to read and write, and which units to convert between.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertConfig {
    #[serde(default = "default_energy_key")]
    pub energy_key: String,
    #[serde(default = "default_energy_output")]
    pub energy_output: String,
    #[serde(default = "default_forces_output")]
    pub forces_output: String,
    #[serde(default = "default_from")]
    pub from: EnergyUnit,
    #[serde(default = "default_to")]
    pub to: EnergyUnit,
}

fn default_energy_key() -> String {
    "E".to_string()
}
fn default_energy_output() -> String {
    "energy".to_string()
}
fn default_forces_output() -> String {
    "frc".to_string()
}
fn default_from() -> EnergyUnit {
    EnergyUnit::Hartree
}
fn default_to() -> EnergyUnit {
    EnergyUnit::ElectronVolt
}

impl Default for ConvertConfig {
    fn default() -> Self {
        get_default_config().clone()
    }
}

impl ConvertConfig {
    /// Factor applied to energies and force components.
    pub fn factor(&self) -> f64 {
        conversion_factor(self.from, self.to)
    }

    /// Rejects key names that could not be written back as extended XYZ.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, key) in [
            ("energy_key", &self.energy_key),
            ("energy_output", &self.energy_output),
            ("forces_output", &self.forces_output),
        ] {
            if let Some(problem) = key_problem(key) {
                return Err(Error::InvalidConfig(format!("{name} '{key}': {problem}")));
            }
        }
        for (name, key) in [
            ("energy_key", &self.energy_key),
            ("energy_output", &self.energy_output),
        ] {
            if FRAME_KEYS.contains(&key.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "{name} '{key}' is reserved for the frame cell and column layout"
                )));
            }
        }
        if RESERVED_KEYS.contains(&self.forces_output.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "forces_output '{}' would overwrite the atom columns",
                self.forces_output
            )));
        }
        Ok(())
    }
}

pub fn load_config(custom_toml: Option<&str>) -> Result<ConvertConfig, Error> {
    let config = match custom_toml {
        Some(toml) => toml::from_str::<ConvertConfig>(toml)?,
        None => get_default_config().clone(),
    };
    config.validate()?;
    Ok(config)
}

pub fn get_default_config() -> &'static ConvertConfig {
    DEFAULT_CONFIG.get_or_init(|| {
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("Failed to parse embedded default conversion settings. This is a library bug.")
    })
}
