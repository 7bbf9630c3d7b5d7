use anyhow::{Context, Result};

use trajkit::merge_with;

use crate::cli::ConvertArgs;
use crate::config::build_convert_config;
use crate::display::{
    Context as DisplayContext, Progress, print_conversion_summary, print_trajectory_info,
};
use crate::io::{read_frames, write_frames};
use crate::util::text::display_name;

const TOTAL_STEPS: u8 = 4;

pub fn run_convert(args: ConvertArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_convert_config(&args.keys, &args.units)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading positions");
    let positions = read_frames(&args.positions, || progress.frame_done())?;
    progress.complete_step(
        "Reading positions",
        &[format!("Load {}", display_name(&args.positions))],
    );

    progress.step("Reading forces");
    let forces = read_frames(&args.forces, || progress.frame_done())?;
    progress.complete_step(
        "Reading forces",
        &[format!("Load {}", display_name(&args.forces))],
    );

    if ctx.interactive {
        print_trajectory_info("Positions", &positions);
    }

    progress.step_frames("Converting energies and forces", positions.len());
    let merged = merge_with(positions, &forces, &config, |_| progress.frame_done())
        .context("Conversion failed")?;
    progress.complete_step(
        "Converting energies and forces",
        &[
            format!(
                "{} → {} ({} → {})",
                config.energy_key, config.energy_output, config.from, config.to
            ),
            format!("Attach forces as '{}'", config.forces_output),
        ],
    );

    if ctx.interactive {
        print_conversion_summary(&config, merged.len());
    }

    progress.step_frames("Writing output", merged.len());
    write_frames(&args.output, &merged, || progress.frame_done())?;
    progress.complete_step(
        "Writing output",
        &[format!("Write extended XYZ → {}", display_name(&args.output))],
    );

    progress.finish("Conversion complete");

    if !args.quiet {
        println!(
            "Converted {} frames written to {}",
            merged.len(),
            args.output.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{KeyOptions, UnitOptions};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use trajkit::io::read_trajectory;
    use trajkit::{ConvertError, HARTREE_TO_EV, Value};

    const SILENT: DisplayContext = DisplayContext { interactive: false };

    fn water_frames(energies: &[&str]) -> String {
        energies
            .iter()
            .map(|e| {
                format!(
                    "3\nE={e}\nO 0.0 0.0 0.0\nH 0.757 0.586 0.0\nH -0.757 0.586 0.0\n"
                )
            })
            .collect()
    }

    fn force_frames(n: usize) -> String {
        (0..n)
            .map(|i| format!("3\nforces {i}\nO 0.0 0.0 0.01\nH 0.02 0.0 0.0\nH -0.02 0.0 0.0\n"))
            .collect()
    }

    fn args(dir: &Path, output: &str) -> ConvertArgs {
        ConvertArgs {
            positions: dir.join("pos.xyz"),
            forces: dir.join("frc.xyz"),
            output: dir.join(output),
            quiet: true,
            keys: KeyOptions::default(),
            units: UnitOptions::default(),
        }
    }

    fn setup(positions: &str, forces: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pos.xyz"), positions).unwrap();
        fs::write(dir.path().join("frc.xyz"), forces).unwrap();
        dir
    }

    #[test]
    fn writes_converted_trajectory() {
        let dir = setup(&water_frames(&["-76.4", "-76.3"]), &force_frames(2));
        run_convert(args(dir.path(), "out.xyz"), SILENT).unwrap();

        let text = fs::read_to_string(dir.path().join("out.xyz")).unwrap();
        let frames = read_trajectory(text.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);

        let energy = frames[1].info.get_f64("energy").unwrap();
        assert!((energy - (-76.3 * HARTREE_TO_EV)).abs() < 1e-6);
        assert!(frames[1].info.get("E").is_none());

        let frc = frames[0].array("frc").and_then(|a| a.vector(1)).unwrap();
        assert!((frc[0] - 0.02 * HARTREE_TO_EV).abs() < 1e-7);
        assert_eq!(frames[0].positions()[1], [0.757, 0.586, 0.0]);
    }

    #[test]
    fn frame_count_mismatch_leaves_no_output() {
        let dir = setup(&water_frames(&["-1"; 5]), &force_frames(3));
        let err = run_convert(args(dir.path(), "out.xyz"), SILENT).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::FrameCountMismatch {
                positions: 5,
                forces: 3
            })
        ));
        assert!(!dir.path().join("out.xyz").exists());
    }

    #[test]
    fn unparseable_energy_leaves_no_output() {
        let dir = setup(&water_frames(&["-1.0", "N/A"]), &force_frames(2));
        let err = run_convert(args(dir.path(), "out.xyz"), SILENT).unwrap_err();

        match err.downcast_ref::<ConvertError>() {
            Some(ConvertError::EnergyParse { frame, raw, .. }) => {
                assert_eq!(*frame, 1);
                assert_eq!(raw, "N/A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("out.xyz").exists());
    }

    #[test]
    fn rerun_on_own_output_reports_missing_energy() {
        let dir = setup(&water_frames(&["-2.0"]), &force_frames(1));
        run_convert(args(dir.path(), "out.xyz"), SILENT).unwrap();

        let mut rerun = args(dir.path(), "again.xyz");
        rerun.positions = dir.path().join("out.xyz");
        let err = run_convert(rerun, SILENT).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::MissingEnergyKey { frame: 0, .. })
        ));
        assert!(!dir.path().join("again.xyz").exists());
    }

    #[test]
    fn unit_and_key_flags_apply() {
        let dir = setup(&water_frames(&["1.5"]), &force_frames(1));
        let mut args = args(dir.path(), "out.xyz");
        args.keys.energy_output = Some("E_ev".into());
        args.units.from = Some(crate::cli::EnergyUnitArg::Ev);
        run_convert(args, SILENT).unwrap();

        let text = fs::read_to_string(dir.path().join("out.xyz")).unwrap();
        let frames = read_trajectory(text.as_bytes()).unwrap();
        assert_eq!(frames[0].info.get("E_ev"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn missing_input_is_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let err = run_convert(args(dir.path(), "out.xyz"), SILENT).unwrap_err();
        assert!(err.to_string().contains("pos.xyz"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
