use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Counter for steps whose frame total is not known up front (reading).
fn counting_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} {prefix:.dim} {msg} {pos:>7} frames")
        .expect("invalid template")
        .tick_chars(TICK_CHARS)
}

/// Bar for steps over a known number of frames (merging, serializing).
fn bounded_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {spinner:.cyan} {prefix:.dim} {msg} [{bar:28.cyan/blue}] {pos}/{len} frames",
    )
    .expect("invalid template")
    .tick_chars(TICK_CHARS)
    .progress_chars("━╸ ")
}

/// Frame-level progress for a fixed sequence of steps, drawn on stderr.
pub struct FrameSteps {
    bar: Option<ProgressBar>,
    started: Instant,
    step_started: Instant,
    step: u8,
    total_steps: u8,
}

impl FrameSteps {
    fn new(total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            started: now,
            step_started: now,
            step: 0,
            total_steps,
        }
    }

    fn begin(&mut self, description: &str, frames: Option<usize>) {
        self.clear();
        self.step += 1;
        self.step_started = Instant::now();

        let bar = match frames {
            Some(len) => ProgressBar::new(len as u64).with_style(bounded_style()),
            None => ProgressBar::new_spinner().with_style(counting_style()),
        };
        bar.set_prefix(format!("[{}/{}]", self.step, self.total_steps));
        bar.set_message(description.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(bar);
    }

    fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn complete(&mut self, description: &str, details: &[String]) {
        let frames = self.bar.as_ref().map_or(0, ProgressBar::position);
        self.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<36} {:>8} frames {:>6.2}s",
            description,
            frames,
            self.step_started.elapsed().as_secs_f64()
        );
        for detail in details {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {detail}");
        }
    }

    fn finish(mut self, summary: &str) {
        self.clear();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[1;32m✓ {summary}\x1b[0m \x1b[2min {:.2}s\x1b[0m",
            self.started.elapsed().as_secs_f64()
        );
        let _ = writeln!(stderr);
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

pub enum Progress {
    Interactive(FrameSteps),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(FrameSteps::new(total_steps))
        } else {
            Self::Silent
        }
    }

    /// Starts a step that counts frames as they appear.
    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(p) = self {
            p.begin(description, None);
        }
    }

    /// Starts a step over exactly `frames` frames.
    pub fn step_frames(&mut self, description: &str, frames: usize) {
        if let Self::Interactive(p) = self {
            p.begin(description, Some(frames));
        }
    }

    /// Records one processed frame in the current step.
    pub fn frame_done(&self) {
        if let Self::Interactive(p) = self {
            p.tick();
        }
    }

    pub fn complete_step(&mut self, description: &str, details: &[String]) {
        if let Self::Interactive(p) = self {
            p.complete(description, details);
        }
    }

    pub fn finish(self, summary: &str) {
        if let Self::Interactive(p) = self {
            p.finish(summary);
        }
    }
}
