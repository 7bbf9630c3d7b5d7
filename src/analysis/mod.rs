//! Post-processing of annotated trajectories.

mod error;
mod histogram;

pub use error::Error;
pub use histogram::{
    Histogram, HistogramConfig, SampleStats, bin_samples, collect_samples, element_histograms,
};
