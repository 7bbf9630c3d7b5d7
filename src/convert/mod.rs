mod config;
mod error;
mod units;

pub use config::{ConvertConfig, get_default_config, load_config};
pub use error::Error;
pub use units::{
    EnergyUnit, HARTREE_TO_EV, KCAL_PER_MOL_TO_EV, KJ_PER_MOL_TO_EV, ParseUnitError,
    RYDBERG_TO_EV, conversion_factor,
};

use crate::model::{
    arrays::ArrayData,
    atom::Vec3,
    frame::Frame,
    info::InfoError,
};

/// Merges a positions+energy trajectory with a forces trajectory.
///
/// Frame `i` of `positions` is paired with frame `i` of `forces`. For each
/// pair the energy under `config.energy_key` is converted and stored under
/// `config.energy_output` (the original key is removed), and the coordinates
/// of the forces frame, converted with the same factor, are attached as the
/// per-atom array `config.forces_output`. Positions are left untouched.
///
/// Fails on the first problem; no frame is returned unless all convert.
pub fn merge(
    positions: Vec<Frame>,
    forces: &[Frame],
    config: &ConvertConfig,
) -> Result<Vec<Frame>, Error> {
    merge_with(positions, forces, config, |_| {})
}

/// [`merge`], calling `on_frame` with the index of each frame once it is converted.
pub fn merge_with<F: FnMut(usize)>(
    mut positions: Vec<Frame>,
    forces: &[Frame],
    config: &ConvertConfig,
    mut on_frame: F,
) -> Result<Vec<Frame>, Error> {
    if positions.len() != forces.len() {
        return Err(Error::FrameCountMismatch {
            positions: positions.len(),
            forces: forces.len(),
        });
    }

    let factor = config.factor();
    for (index, (frame, forces_frame)) in positions.iter_mut().zip(forces).enumerate() {
        convert_frame(index, frame, forces_frame, config, factor)?;
        on_frame(index);
    }

    Ok(positions)
}

fn convert_frame(
    index: usize,
    frame: &mut Frame,
    forces: &Frame,
    config: &ConvertConfig,
    factor: f64,
) -> Result<(), Error> {
    let energy = frame
        .info
        .get_f64(&config.energy_key)
        .map_err(|e| match e {
            InfoError::Missing { key } => Error::MissingEnergyKey { frame: index, key },
            InfoError::NotNumeric { key, raw } => Error::EnergyParse {
                frame: index,
                key,
                raw,
            },
        })?;

    if frame.atom_count() != forces.atom_count() {
        return Err(Error::AtomCountMismatch {
            frame: index,
            positions: frame.atom_count(),
            forces: forces.atom_count(),
        });
    }

    let converted: Vec<Vec3> = forces
        .atoms()
        .iter()
        .map(|atom| atom.position.map(|c| c * factor))
        .collect();

    frame.info.remove(&config.energy_key);
    frame
        .info
        .insert(config.energy_output.clone(), energy * factor);
    frame
        .set_array(config.forces_output.clone(), ArrayData::vectors(&converted))
        .map_err(|source| Error::Array {
            frame: index,
            source,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{atom::Atom, element::Element, info::Value};

    fn positions_frame(energy: Option<Value>) -> Frame {
        let mut frame = Frame::new(vec![
            Atom::new(Element::O, [0.0, 0.0, 0.119]),
            Atom::new(Element::H, [0.0, 0.763, -0.477]),
            Atom::new(Element::H, [0.0, -0.763, -0.477]),
        ]);
        if let Some(e) = energy {
            frame.info.insert("E", e);
        }
        frame.info.insert("step", 1i64);
        frame
    }

    fn forces_frame(scale: f64) -> Frame {
        Frame::new(vec![
            Atom::new(Element::O, [0.01 * scale, -0.02 * scale, 0.03 * scale]),
            Atom::new(Element::H, [-0.005 * scale, 0.01 * scale, -0.015 * scale]),
            Atom::new(Element::H, [-0.005 * scale, 0.01 * scale, -0.015 * scale]),
        ])
    }

    fn trajectory(n: usize) -> (Vec<Frame>, Vec<Frame>) {
        let positions = (0..n)
            .map(|i| positions_frame(Some(Value::Float(-76.0 - i as f64 * 0.1))))
            .collect();
        let forces = (0..n).map(|i| forces_frame(1.0 + i as f64)).collect();
        (positions, forces)
    }

    #[test]
    fn converts_energy_and_forces_in_order() {
        let (positions, forces) = trajectory(4);
        let originals = positions.clone();
        let merged = merge(positions, &forces, &ConvertConfig::default()).expect("merge");

        assert_eq!(merged.len(), 4);
        for (i, frame) in merged.iter().enumerate() {
            let expected = (-76.0 - i as f64 * 0.1) * HARTREE_TO_EV;
            let energy = frame.info.get_f64("energy").unwrap();
            assert!((energy - expected).abs() < 1e-9);
            assert!(!frame.info.contains_key("E"));
            assert_eq!(frame.info.get("step"), Some(&Value::Int(1)));

            let frc = frame.array("frc").expect("frc array");
            for (atom, raw) in forces[i].atoms().iter().enumerate() {
                let got = frc.vector(atom).unwrap();
                for k in 0..3 {
                    assert!((got[k] - raw.position[k] * 27.211386024367243).abs() < 1e-12);
                }
            }
            assert_eq!(frame.atoms(), originals[i].atoms());
        }
    }

    #[test]
    fn integer_and_string_energies_are_numbers() {
        let positions = vec![
            positions_frame(Some(Value::Int(-2))),
            positions_frame(Some(Value::Str("-1.5".into()))),
        ];
        let forces = vec![forces_frame(1.0), forces_frame(1.0)];
        let merged = merge(positions, &forces, &ConvertConfig::default()).unwrap();
        assert_eq!(merged[0].info.get("energy"), Some(&Value::Float(-2.0 * HARTREE_TO_EV)));
        assert_eq!(merged[1].info.get("energy"), Some(&Value::Float(-1.5 * HARTREE_TO_EV)));
    }

    #[test]
    fn reports_each_converted_frame_in_order() {
        let (positions, forces) = trajectory(4);
        let mut seen = Vec::new();
        merge_with(positions, &forces, &ConvertConfig::default(), |i| seen.push(i)).unwrap();
        assert_eq!(seen, vec![0, 1, 2, 3]);

        let (mut positions, forces) = trajectory(4);
        positions[2].info.remove("E");
        let mut seen = Vec::new();
        let err = merge_with(positions, &forces, &ConvertConfig::default(), |i| seen.push(i))
            .unwrap_err();
        assert!(matches!(err, Error::MissingEnergyKey { frame: 2, .. }));
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn frame_count_mismatch_reports_both_counts() {
        let (positions, _) = trajectory(5);
        let (_, forces) = trajectory(3);
        let err = merge(positions, &forces, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::FrameCountMismatch {
                positions: 5,
                forces: 3
            }
        ));
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn missing_energy_key_names_the_frame() {
        let (mut positions, forces) = trajectory(3);
        positions[2].info.remove("E");
        let err = merge(positions, &forces, &ConvertConfig::default()).unwrap_err();
        match err {
            Error::MissingEnergyKey { frame, key } => {
                assert_eq!(frame, 2);
                assert_eq!(key, "E");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unparseable_energy_reports_raw_value() {
        let (mut positions, forces) = trajectory(2);
        positions[1].info.insert("E", "N/A");
        let err = merge(positions, &forces, &ConvertConfig::default()).unwrap_err();
        match &err {
            Error::EnergyParse { frame, raw, .. } => {
                assert_eq!(*frame, 1);
                assert_eq!(raw, "N/A");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("'N/A'"));
    }

    #[test]
    fn boolean_energy_is_not_a_number() {
        let positions = vec![positions_frame(Some(Value::Bool(true)))];
        let forces = vec![forces_frame(1.0)];
        let err = merge(positions, &forces, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EnergyParse { frame: 0, ref raw, .. } if raw == "T"));
    }

    #[test]
    fn atom_count_mismatch_is_fatal() {
        let positions = vec![positions_frame(Some(Value::Float(-1.0)))];
        let forces = vec![Frame::new(vec![Atom::new(Element::O, [0.0; 3])])];
        let err = merge(positions, &forces, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::AtomCountMismatch {
                frame: 0,
                positions: 3,
                forces: 1
            }
        ));
    }

    #[test]
    fn converting_converted_frames_fails_on_missing_key() {
        let (positions, forces) = trajectory(2);
        let merged = merge(positions, &forces, &ConvertConfig::default()).unwrap();
        let err = merge(merged, &forces, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingEnergyKey { frame: 0, .. }));
    }

    #[test]
    fn custom_keys_and_units() {
        let config = load_config(Some(
            "energy_key = \"Etot\"\nenergy_output = \"E_kcal\"\nforces_output = \"forces\"\nto = \"kcal/mol\"\n",
        ))
        .unwrap();
        let mut frame = positions_frame(None);
        frame.info.insert("Etot", -1.0);
        let merged = merge(vec![frame], &[forces_frame(1.0)], &config).unwrap();

        let factor = conversion_factor(EnergyUnit::Hartree, EnergyUnit::KcalPerMol);
        assert_eq!(merged[0].info.get_f64("E_kcal"), Ok(-factor));
        assert!(!merged[0].info.contains_key("Etot"));
        assert!(merged[0].array("forces").is_some());
        assert!(merged[0].array("frc").is_none());
    }

    #[test]
    fn empty_trajectories_merge_to_nothing() {
        let merged = merge(Vec::new(), &[], &ConvertConfig::default()).unwrap();
        assert!(merged.is_empty());
    }
}
