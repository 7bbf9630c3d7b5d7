//! Error types for the unit-converting frame merger.

use thiserror::Error;

use crate::model::arrays::ArrayError;

/// Errors that abort a conversion run.
///
/// Frame indices are zero-based positions in the input trajectories.
#[derive(Debug, Error)]
pub enum Error {
    /// The two input trajectories hold a different number of frames.
    #[error(
        "mismatch in number of frames: positions file has {positions} while forces file has {forces}"
    )]
    FrameCountMismatch { positions: usize, forces: usize },

    /// A positions frame has no energy entry in its comment line.
    #[error("frame {frame} in positions file does not contain key '{key}' in its comment line")]
    MissingEnergyKey { frame: usize, key: String },

    /// The energy entry is present but is not a number.
    #[error("frame {frame}: unable to convert energy '{raw}' (key '{key}') to a number")]
    EnergyParse {
        frame: usize,
        key: String,
        /// The value exactly as it was read.
        raw: String,
    },

    /// Paired frames describe a different number of atoms.
    #[error("frame {frame}: positions file has {positions} atoms while forces file has {forces}")]
    AtomCountMismatch {
        frame: usize,
        positions: usize,
        forces: usize,
    },

    /// The converted forces could not be attached to the frame.
    #[error("frame {frame}: {source}")]
    Array {
        frame: usize,
        #[source]
        source: ArrayError,
    },

    /// The settings file is not valid TOML or has unknown fields/units.
    #[error("failed to parse conversion settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid conversion settings: {0}")]
    InvalidConfig(String),
}
