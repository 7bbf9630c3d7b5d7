//! A pure Rust toolkit for preparing atomistic trajectories for machine-learned
//! potential training. It merges per-frame energies and per-atom forces coming
//! from separate XYZ files into a single extended XYZ trajectory, converting
//! both from quantum-chemistry units into electron-volts.
//!
//! # Features
//!
//! - **Unit conversion**: hartree, rydberg, kcal/mol and kJ/mol energies to eV
//!   (or between any pair of them), applied to energies and forces alike
//! - **Frame merging**: pairs positions and forces trajectories frame by frame,
//!   attaching the forces as a per-atom array
//! - **Extended XYZ I/O**: reads plain and extended XYZ, writes extended XYZ with
//!   `Lattice`, `pbc`, `Properties` and free-form `key=value` metadata
//! - **Per-element analysis**: histograms of per-atom scalar properties such as
//!   predicted node energies
//!
//! # Quick Start
//!
//! ```
//! use trajkit::io::read_trajectory;
//! use trajkit::{ConvertConfig, HARTREE_TO_EV, Value, merge};
//!
//! let positions = "\
//! 2
//! E=-1.0
//! H 0.0 0.0 0.0
//! H 0.0 0.0 0.74
//! ";
//! let forces = "\
//! 2
//! step 0
//! H 0.0 0.0 -0.1
//! H 0.0 0.0 0.1
//! ";
//!
//! let positions = read_trajectory(positions.as_bytes())?;
//! let forces = read_trajectory(forces.as_bytes())?;
//!
//! let merged = merge(positions, &forces, &ConvertConfig::default())?;
//!
//! let frame = &merged[0];
//! assert!(frame.info.get("E").is_none());
//! assert_eq!(frame.info.get("energy"), Some(&Value::Float(-HARTREE_TO_EV)));
//!
//! let frc = frame.array("frc").and_then(|a| a.vector(1)).unwrap();
//! assert!((frc[2] - 0.1 * HARTREE_TO_EV).abs() < 1e-12);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: XYZ / extended XYZ reading and writing
//! - [`merge`]: the energy and force merging step
//! - [`analysis`]: per-element statistics over trajectories
//!
//! # Data Types
//!
//! - [`Frame`]: one configuration with metadata and per-atom arrays
//! - [`Atom`]: element plus Cartesian position
//! - [`Element`]: chemical element (H through Og)
//! - [`Info`] / [`Value`]: ordered per-frame metadata
//! - [`ArrayData`]: typed per-atom columns
//! - [`ConvertConfig`] / [`EnergyUnit`]: merge settings

mod convert;
mod model;

pub mod analysis;
pub mod io;

pub use model::arrays::{ArrayData, ArrayError, Arrays, ColumnKind};
pub use model::atom::{Atom, Vec3};
pub use model::element::{Element, ParseElementError};
pub use model::frame::Frame;
pub use model::info::{Info, InfoError, Value};

pub use convert::{
    ConvertConfig, EnergyUnit, HARTREE_TO_EV, KCAL_PER_MOL_TO_EV, KJ_PER_MOL_TO_EV,
    ParseUnitError, RYDBERG_TO_EV, conversion_factor, get_default_config, load_config, merge,
    merge_with,
};

pub use convert::Error as ConvertError;
