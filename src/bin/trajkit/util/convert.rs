use trajkit::EnergyUnit;

use crate::cli::EnergyUnitArg;

impl From<EnergyUnitArg> for EnergyUnit {
    fn from(arg: EnergyUnitArg) -> Self {
        match arg {
            EnergyUnitArg::Hartree => EnergyUnit::Hartree,
            EnergyUnitArg::Ev => EnergyUnit::ElectronVolt,
            EnergyUnitArg::Rydberg => EnergyUnit::Rydberg,
            EnergyUnitArg::KcalMol => EnergyUnit::KcalPerMol,
            EnergyUnitArg::KjMol => EnergyUnit::KjPerMol,
        }
    }
}
