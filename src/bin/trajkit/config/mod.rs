mod convert;
mod histogram;

pub use convert::build_convert_config;
pub use histogram::build_histogram_config;
