//! Energy units and conversion constants.
//!
//! Lengths stay in Å throughout, so forces in energy/Å convert with the same
//! factor as energies.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// eV per hartree (CODATA 2018).
pub const HARTREE_TO_EV: f64 = 27.211386024367243;
/// eV per rydberg.
pub const RYDBERG_TO_EV: f64 = HARTREE_TO_EV / 2.0;
/// eV per kJ/mol (Faraday constant / 1000).
pub const KJ_PER_MOL_TO_EV: f64 = 1.0 / 96.485_332_123_310_02;
/// eV per kcal/mol.
pub const KCAL_PER_MOL_TO_EV: f64 = 4.184 * KJ_PER_MOL_TO_EV;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown energy unit '{0}' (use hartree, ev, rydberg, kcal/mol or kj/mol)")]
pub struct ParseUnitError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum EnergyUnit {
    Hartree,
    ElectronVolt,
    Rydberg,
    KcalPerMol,
    KjPerMol,
}

impl EnergyUnit {
    pub fn ev_per_unit(&self) -> f64 {
        match self {
            EnergyUnit::Hartree => HARTREE_TO_EV,
            EnergyUnit::ElectronVolt => 1.0,
            EnergyUnit::Rydberg => RYDBERG_TO_EV,
            EnergyUnit::KcalPerMol => KCAL_PER_MOL_TO_EV,
            EnergyUnit::KjPerMol => KJ_PER_MOL_TO_EV,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnergyUnit::Hartree => "hartree",
            EnergyUnit::ElectronVolt => "eV",
            EnergyUnit::Rydberg => "Ry",
            EnergyUnit::KcalPerMol => "kcal/mol",
            EnergyUnit::KjPerMol => "kJ/mol",
        }
    }
}

/// Multiplicative factor taking a quantity in `from` to `to`.
pub fn conversion_factor(from: EnergyUnit, to: EnergyUnit) -> f64 {
    if from == to {
        return 1.0;
    }
    from.ev_per_unit() / to.ev_per_unit()
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnergyUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hartree" | "ha" | "eh" | "au" => Ok(EnergyUnit::Hartree),
            "ev" | "electronvolt" => Ok(EnergyUnit::ElectronVolt),
            "rydberg" | "ry" => Ok(EnergyUnit::Rydberg),
            "kcal/mol" | "kcal_mol" | "kcalmol" => Ok(EnergyUnit::KcalPerMol),
            "kj/mol" | "kj_mol" | "kjmol" => Ok(EnergyUnit::KjPerMol),
            _ => Err(ParseUnitError(s.to_string())),
        }
    }
}

impl TryFrom<String> for EnergyUnit {
    type Error = ParseUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
