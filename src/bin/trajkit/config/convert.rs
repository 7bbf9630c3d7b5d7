use std::fs;

use anyhow::{Context, Result};
use trajkit::{ConvertConfig, EnergyUnit, load_config};

use crate::cli::{KeyOptions, UnitOptions};

/// Embedded defaults, overlaid by `--config`, overlaid by individual flags.
pub fn build_convert_config(keys: &KeyOptions, units: &UnitOptions) -> Result<ConvertConfig> {
    let mut config = match &keys.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
            load_config(Some(&text))
                .with_context(|| format!("Invalid settings file: {}", path.display()))?
        }
        None => ConvertConfig::default(),
    };

    if let Some(key) = &keys.energy_key {
        config.energy_key = key.clone();
    }
    if let Some(key) = &keys.energy_output {
        config.energy_output = key.clone();
    }
    if let Some(key) = &keys.forces_output {
        config.forces_output = key.clone();
    }
    if let Some(unit) = units.from {
        config.from = EnergyUnit::from(unit);
    }
    if let Some(unit) = units.to {
        config.to = EnergyUnit::from(unit);
    }

    config.validate().context("Invalid conversion settings")?;
    Ok(config)
}
