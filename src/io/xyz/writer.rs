use std::fmt::Write as _;
use std::io::Write;

use super::header::{LATTICE_KEY, PBC_KEY, PROPERTIES_KEY};
use super::{FRAME_KEYS, key_problem};
use crate::io::error::Error;
use crate::model::{arrays::ArrayData, frame::Frame, info::Value};

/// Writes frames as extended XYZ, one block per frame.
pub fn write<W: Write>(mut writer: W, frames: &[Frame]) -> Result<(), Error> {
    for frame in frames {
        write_frame(&mut writer, frame)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<(), Error> {
    writeln!(writer, "{}", frame.atom_count())?;
    writeln!(writer, "{}", format_header(frame)?)?;

    let mut line = String::new();
    for (i, atom) in frame.atoms().iter().enumerate() {
        line.clear();
        let _ = write!(line, "{:<2}", atom.element.symbol());
        for x in atom.position {
            let _ = write!(line, " {x:16.8}");
        }
        for (key, data) in frame.arrays().iter() {
            push_row(&mut line, key, data, i)?;
        }
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

fn format_header(frame: &Frame) -> Result<String, Error> {
    let mut header = String::new();

    if let Some(lattice) = &frame.lattice {
        let values: Vec<String> = lattice.iter().flatten().map(|v| format!("{v:?}")).collect();
        let _ = write!(header, "{LATTICE_KEY}=\"{}\" ", values.join(" "));
    }

    let _ = write!(header, "{PROPERTIES_KEY}=species:S:1:pos:R:3");
    for (key, data) in frame.arrays().iter() {
        check_key(key)?;
        let _ = write!(header, ":{}:{}:{}", key, data.kind().code(), data.width());
    }

    for (key, value) in frame.info.iter() {
        check_key(key)?;
        if FRAME_KEYS.contains(&key) {
            return Err(Error::unwritable(
                key,
                "the key is reserved for the frame cell and column layout",
            ));
        }
        let _ = write!(header, " {key}={}", format_value(key, value)?);
    }

    let flags: Vec<&str> = frame.pbc.iter().map(|&p| if p { "T" } else { "F" }).collect();
    let _ = write!(header, " {PBC_KEY}=\"{}\"", flags.join(" "));

    Ok(header)
}

fn check_key(key: &str) -> Result<(), Error> {
    match key_problem(key) {
        Some(problem) => Err(Error::unwritable(key, problem)),
        None => Ok(()),
    }
}

fn format_value(key: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::Floats(_) => Ok(format!("\"{value}\"")),
        Value::Str(s) => {
            if s.contains(['\n', '\r']) {
                return Err(Error::unwritable(key, "string values must fit on one line"));
            }
            let needs_quotes = s.is_empty()
                || !matches!(Value::parse(s), Value::Str(_))
                || s.starts_with(['{', '['])
                || s.chars().any(|c| c.is_whitespace() || matches!(c, '=' | '"' | '\\'));
            if needs_quotes {
                let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
                Ok(format!("\"{escaped}\""))
            } else {
                Ok(s.clone())
            }
        }
        _ => Ok(value.to_string()),
    }
}

fn push_row(line: &mut String, key: &str, data: &ArrayData, i: usize) -> Result<(), Error> {
    let width = data.width();
    let range = i * width..(i + 1) * width;
    match data {
        ArrayData::Real { values, .. } => {
            for v in &values[range] {
                let _ = write!(line, " {v:16.8}");
            }
        }
        ArrayData::Int { values, .. } => {
            for v in &values[range] {
                let _ = write!(line, " {v:8}");
            }
        }
        ArrayData::Bool { values, .. } => {
            for &v in &values[range] {
                line.push_str(if v { " T" } else { " F" });
            }
        }
        ArrayData::Str { values, .. } => {
            for v in &values[range] {
                if v.is_empty() || v.chars().any(char::is_whitespace) {
                    return Err(Error::unwritable(
                        key,
                        "per-atom strings must be non-empty and contain no whitespace",
                    ));
                }
                let _ = write!(line, " {v}");
            }
        }
    }
    Ok(())
}
