//! Trajectory file I/O.
//!
//! Reads multi-frame XYZ and extended XYZ (the comment line carries
//! `key=value` metadata and a `Properties` column layout) and writes extended
//! XYZ, so that per-frame metadata and per-atom arrays survive a round trip.

pub mod error;
mod xyz;

pub use error::Error;
pub use xyz::reader::XyzReader;
pub(crate) use xyz::{FRAME_KEYS, key_problem};

use crate::model::frame::Frame;
use std::io::{BufRead, Write};

/// Reads every frame of an (extended) XYZ trajectory.
pub fn read_trajectory<R: BufRead>(reader: R) -> Result<Vec<Frame>, Error> {
    xyz::reader::read(reader)
}

/// Writes frames as extended XYZ.
pub fn write_trajectory<W: Write>(writer: W, frames: &[Frame]) -> Result<(), Error> {
    xyz::writer::write(writer, frames)
}

/// Writes a single frame as extended XYZ.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<(), Error> {
    xyz::writer::write_frame(writer, frame)
}
