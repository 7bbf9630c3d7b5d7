use trajkit::analysis::HistogramConfig;

use crate::cli::HistogramArgs;

pub fn build_histogram_config(args: &HistogramArgs) -> HistogramConfig {
    HistogramConfig {
        key: args.key.clone(),
        elements: args.elements.clone(),
        nframes: args.nframes,
        bins: args.output.bins,
    }
}
