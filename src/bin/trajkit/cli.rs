use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use trajkit::Element;

#[derive(Parser)]
#[command(
    name = "trajkit",
    about = "Energy/force unit conversion and merging for XYZ trajectories",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge energies and forces into one extended XYZ file, converting units
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Per-element histograms of a per-atom property (e.g. node energies)
    #[command(visible_alias = "h")]
    Histogram(HistogramArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Trajectory with positions and the per-frame energy
    #[arg(long, value_name = "FILE")]
    pub positions: PathBuf,

    /// Trajectory whose coordinate columns hold the forces
    #[arg(long, value_name = "FILE")]
    pub forces: PathBuf,

    /// Destination extended XYZ file
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub keys: KeyOptions,

    #[command(flatten)]
    pub units: UnitOptions,
}

/// Metadata keys read and written during conversion.
#[derive(Args, Default)]
#[command(next_help_heading = "Keys")]
pub struct KeyOptions {
    /// Settings file (TOML); flags below take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Comment-line key holding the input energy [default: E]
    #[arg(long, value_name = "KEY")]
    pub energy_key: Option<String>,

    /// Comment-line key for the converted energy [default: energy]
    #[arg(long, value_name = "KEY")]
    pub energy_output: Option<String>,

    /// Per-atom array name for the converted forces [default: frc]
    #[arg(long, value_name = "KEY")]
    pub forces_output: Option<String>,
}

#[derive(Args, Default)]
#[command(next_help_heading = "Units")]
pub struct UnitOptions {
    /// Energy unit of the input files [default: hartree]
    #[arg(long, value_name = "UNIT")]
    pub from: Option<EnergyUnitArg>,

    /// Energy unit of the output file [default: ev]
    #[arg(long, value_name = "UNIT")]
    pub to: Option<EnergyUnitArg>,
}

#[derive(Args)]
pub struct HistogramArgs {
    /// Annotated trajectory (extended XYZ)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Element symbols to report, in order
    #[arg(
        short,
        long,
        value_name = "SYM",
        num_args = 1..,
        value_delimiter = ',',
        required = true
    )]
    pub elements: Vec<Element>,

    /// Use only the first N frames
    #[arg(short, long, value_name = "N")]
    pub nframes: Option<usize>,

    /// Per-atom scalar array to sample
    #[arg(short, long, value_name = "KEY", default_value = "node_energy")]
    pub key: String,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub output: HistogramOutputOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Histogram Output")]
pub struct HistogramOutputOptions {
    /// Number of equal-width bins
    #[arg(short, long, value_name = "N", default_value = "100")]
    pub bins: usize,

    /// Also write the bins as CSV (element,bin_start,bin_end,count)
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Maximum bar length of the text histogram
    #[arg(long, value_name = "COLS", default_value = "40")]
    pub width: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EnergyUnitArg {
    /// Hartree (atomic units)
    #[value(alias = "ha")]
    Hartree,
    /// Electron-volt
    #[value(alias = "electronvolt")]
    Ev,
    /// Rydberg
    #[value(alias = "ry")]
    Rydberg,
    /// kcal/mol
    #[value(name = "kcal-mol", alias = "kcal/mol")]
    KcalMol,
    /// kJ/mol
    #[value(name = "kj-mol", alias = "kj/mol")]
    KjMol,
}

pub fn parse() -> Cli {
    Cli::parse()
}
