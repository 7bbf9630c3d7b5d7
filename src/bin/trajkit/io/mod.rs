use std::fs::{self, File};
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use trajkit::Frame;
use trajkit::io::{XyzReader, write_frame};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Reads every frame of `path`, calling `on_frame` after each one.
pub fn read_frames(path: &Path, mut on_frame: impl FnMut()) -> Result<Vec<Frame>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let mut frames = Vec::new();
    for frame in XyzReader::new(BufReader::new(file)) {
        frames.push(
            frame.with_context(|| format!("Failed to read trajectory: {}", path.display()))?,
        );
        on_frame();
    }
    Ok(frames)
}

/// Serializes all frames in memory first so that a failed write never leaves a
/// partial file behind.
pub fn write_frames(path: &Path, frames: &[Frame], mut on_frame: impl FnMut()) -> Result<()> {
    let mut buffer = Vec::new();
    for frame in frames {
        write_frame(&mut buffer, frame)
            .with_context(|| format!("Failed to serialize trajectory for {}", path.display()))?;
        on_frame();
    }
    fs::write(path, buffer)
        .with_context(|| format!("Failed to create output file: {}", path.display()))
}

pub fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TWO_FRAMES: &str = "1\nE=-1.0\nH 0 0 0\n1\nE=-2.0\nH 0 0 1\n";

    #[test]
    fn counts_frames_while_reading_and_writing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xyz");
        fs::write(&input, TWO_FRAMES).unwrap();

        let mut read = 0;
        let frames = read_frames(&input, || read += 1).unwrap();
        assert_eq!((frames.len(), read), (2, 2));

        let output = dir.path().join("out.xyz");
        let mut written = 0;
        write_frames(&output, &frames, || written += 1).unwrap();
        assert_eq!(written, 2);
        assert_eq!(read_frames(&output, || {}).unwrap().len(), 2);
    }

    #[test]
    fn read_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.xyz");
        fs::write(&input, "2\nE=1\nH 0 0 0\n").unwrap();

        let mut read = 0;
        let err = read_frames(&input, || read += 1).unwrap_err();
        assert!(err.to_string().contains("broken.xyz"));
        assert_eq!(read, 0);
    }
}
