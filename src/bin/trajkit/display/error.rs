use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        collector.collect_io_hints(err);
        collector.collect_convert_hints(err);
        collector.collect_analysis_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use trajkit::io::Error as IoError;

        if let Some(source) = err.downcast_ref::<std::io::Error>() {
            self.mark_typed();
            self.collect_std_io_hints(source);
            return;
        }

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { line, .. } => {
                self.add(format!("The XYZ reader stopped near line {}", line));
                self.add("Each frame needs an atom count line, a comment line, then one line per atom");
                self.add("Check that the atom count matches the number of atom lines");
            }

            IoError::Unwritable { key, .. } => {
                self.add(format!("Metadata entry '{}' has no extended XYZ representation", key));
                self.add("Keys must not contain whitespace, '=', ':' or quotes");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File is not valid UTF-8 text");
                self.add("XYZ trajectories must be plain text files");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_convert_hints(&mut self, err: &Error) {
        use trajkit::ConvertError;

        let Some(convert_err) = err.downcast_ref::<ConvertError>() else {
            return;
        };

        self.mark_typed();

        match convert_err {
            ConvertError::FrameCountMismatch { .. } => {
                self.add("Positions and forces must come from the same run, one frame per step");
                self.add("Check for a truncated file or an extra trailing frame");
            }

            ConvertError::MissingEnergyKey { frame, key } => {
                if *frame == 0 {
                    self.add(format!(
                        "The comment line of the first frame has no '{}=' entry",
                        key
                    ));
                    self.add("If this file was already converted, its energy is under the output key");
                    self.add("Use --energy-key to select a different comment-line key");
                } else {
                    self.add(format!("Frame {} lacks '{}' while earlier frames have it", frame, key));
                    self.add("The trajectory may mix frames from different sources");
                }
            }

            ConvertError::EnergyParse { raw, .. } => {
                self.add(format!("'{}' is not a number", raw));
                self.add("The calculation for that frame may have failed to converge");
            }

            ConvertError::AtomCountMismatch { .. } => {
                self.add("The two files describe different systems at this frame");
                self.add("Check that the files are paired in the right order");
            }

            ConvertError::Array { .. } => {
                self.add("The forces array could not be attached to the frame");
                self.add("Choose a different --forces-output name");
            }

            ConvertError::ConfigParse(_) => {
                self.add("Settings file has invalid TOML syntax or unknown keys");
                self.add("Known keys: energy_key, energy_output, forces_output, from, to");
                self.add("Known units: hartree, ev, rydberg, kcal/mol, kj/mol");
            }

            ConvertError::InvalidConfig(_) => {
                self.add("Key names must be non-empty without whitespace, '=', ':' or quotes");
                self.add("'Lattice', 'pbc' and 'Properties' cannot hold the energy");
                self.add("'species' and 'pos' are reserved for the atom columns");
            }
        }
    }

    fn collect_analysis_hints(&mut self, err: &Error) {
        use trajkit::analysis::Error as AnalysisError;

        let Some(analysis_err) = err.downcast_ref::<AnalysisError>() else {
            return;
        };

        self.mark_typed();

        match analysis_err {
            AnalysisError::MissingArray { key, .. } => {
                self.add(format!("No '{}' column in the Properties of that frame", key));
                self.add("Use --key to select the per-atom property to histogram");
            }

            AnalysisError::NotScalar { .. } | AnalysisError::NotReal { .. } => {
                self.add("Only single-column real properties can be histogrammed");
                self.add("Declare it as <name>:R:1 in the Properties entry");
            }

            AnalysisError::FrameLimit { available, .. } => {
                self.add(format!("Pass --nframes {} or less, or omit it to use all frames", available));
            }

            AnalysisError::NoSamples { element } => {
                self.add(format!("Element {} does not occur in the selected frames", element));
                self.add("Element symbols are case-sensitive (e.g. Cl, not CL)");
            }

            AnalysisError::ZeroBins => {
                self.add("Use --bins with a positive value");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
