use thiserror::Error;

use crate::model::{arrays::ColumnKind, element::Element};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("frame {frame} has no per-atom array '{key}'")]
    MissingArray { frame: usize, key: String },

    #[error("per-atom array '{key}' has {width} columns; a single value per atom is required")]
    NotScalar { key: String, width: usize },

    #[error("per-atom array '{key}' holds {kind} values; real values are required")]
    NotReal { key: String, kind: ColumnKind },

    #[error("requested {requested} frames but the trajectory only has {available}")]
    FrameLimit { requested: usize, available: usize },

    #[error("no atoms of element {element} found in the selected frames")]
    NoSamples { element: Element },

    #[error("the number of bins must be at least 1")]
    ZeroBins,
}
