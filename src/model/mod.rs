//! Core data structures for atomistic trajectories.
//!
//! - [`element`] – Periodic table elements.
//! - [`atom`] – An element with Cartesian coordinates.
//! - [`info`] – Per-frame scalar metadata with typed values.
//! - [`arrays`] – Per-atom arrays (forces, per-atom energies, ...).
//! - [`frame`] – One configuration: atoms, metadata, arrays and cell.
//!
//! A trajectory is simply a `Vec<Frame>`.

pub mod arrays;
pub mod atom;
pub mod element;
pub mod frame;
pub mod info;
