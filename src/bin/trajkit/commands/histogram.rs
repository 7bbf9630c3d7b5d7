use std::io::{self, Write};

use anyhow::{Context, Result};

use trajkit::analysis::element_histograms;

use crate::cli::HistogramArgs;
use crate::config::build_histogram_config;
use crate::display::{
    Context as DisplayContext, Progress, print_trajectory_info, write_histogram_csv,
    write_histogram_text,
};
use crate::io::{create_output, read_frames};
use crate::util::text::display_name;

pub fn run_histogram(args: HistogramArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_histogram_config(&args);
    let total_steps = if args.output.csv.is_some() { 3 } else { 2 };

    let mut progress = Progress::new(ctx.interactive, total_steps);

    progress.step("Reading trajectory");
    let frames = read_frames(&args.input, || progress.frame_done())?;
    progress.complete_step(
        "Reading trajectory",
        &[format!("Load {}", display_name(&args.input))],
    );

    if ctx.interactive {
        print_trajectory_info("Trajectory", &frames);
    }

    progress.step("Binning per-atom values");
    let histograms =
        element_histograms(&frames, &config).context("Histogram construction failed")?;
    let substeps: Vec<String> = histograms
        .iter()
        .map(|h| format!("{}: {} samples", h.element, h.stats.count))
        .collect();
    progress.complete_step("Binning per-atom values", &substeps);

    if let Some(path) = &args.output.csv {
        progress.step("Writing CSV");
        write_histogram_csv(create_output(path)?, &histograms)
            .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        progress.complete_step(
            "Writing CSV",
            &[format!("Write bins → {}", display_name(path))],
        );
    }

    progress.finish("Histograms complete");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for hist in &histograms {
        write_histogram_text(&mut out, hist, args.output.width)?;
    }
    out.flush()?;

    Ok(())
}
