//! The comment line of an (extended) XYZ frame.
//!
//! Extended XYZ stores `key=value` pairs on the second line of each frame.
//! `Lattice`, `pbc` and `Properties` describe the frame itself; every other
//! pair becomes frame metadata.

use crate::io::error::Error;
use crate::model::arrays::ColumnKind;
use crate::model::info::{Info, Value, parse_bool};

pub(crate) const LATTICE_KEY: &str = "Lattice";
pub(crate) const PBC_KEY: &str = "pbc";
pub(crate) const PROPERTIES_KEY: &str = "Properties";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Property {
    pub name: String,
    pub kind: ColumnKind,
    pub width: usize,
}

impl Property {
    fn new(name: &str, kind: ColumnKind, width: usize) -> Self {
        Self {
            name: name.to_string(),
            kind,
            width,
        }
    }
}

pub(crate) fn default_properties() -> Vec<Property> {
    vec![
        Property::new("species", ColumnKind::Str, 1),
        Property::new("pos", ColumnKind::Real, 3),
    ]
}

#[derive(Debug, Default)]
pub(crate) struct Header {
    pub lattice: Option<[[f64; 3]; 3]>,
    pub pbc: Option<[bool; 3]>,
    pub properties: Option<Vec<Property>>,
    pub info: Info,
}

pub(crate) fn parse(line: &str, line_no: usize) -> Result<Header, Error> {
    let mut header = Header::default();

    // Plain XYZ: free-form comment.
    if !line.contains('=') {
        let comment = line.trim();
        if !comment.is_empty() {
            header.info.insert("comment", comment);
        }
        return Ok(header);
    }

    for (key, value) in tokenize(line, line_no)? {
        let Some(RawValue { text: value, quoted }) = value else {
            header.info.insert(key, true);
            continue;
        };

        if key == LATTICE_KEY {
            header.lattice = Some(parse_lattice(&value, line_no)?);
        } else if key == PBC_KEY {
            header.pbc = Some(parse_pbc(&value, line_no)?);
        } else if key == PROPERTIES_KEY {
            header.properties = Some(parse_properties(&value, line_no)?);
        } else {
            let value = if quoted {
                Value::parse_quoted(&value)
            } else {
                Value::parse(&value)
            };
            header.info.insert(key, value);
        }
    }

    Ok(header)
}

struct RawValue {
    text: String,
    /// Written inside `"..."`.
    quoted: bool,
}

fn tokenize(line: &str, line_no: usize) -> Result<Vec<(String, Option<RawValue>)>, Error> {
    let chars: Vec<char> = line.chars().collect();
    let mut pos = 0;
    let mut pairs = Vec::new();

    loop {
        skip_whitespace(&chars, &mut pos);
        if pos >= chars.len() {
            break;
        }

        let key = read_token(&chars, &mut pos, line_no, true)?;
        if key.is_empty() {
            return Err(Error::parse(line_no, "header contains a value without a key"));
        }

        let mut look = pos;
        skip_whitespace(&chars, &mut look);
        if look < chars.len() && chars[look] == '=' {
            pos = look + 1;
            skip_whitespace(&chars, &mut pos);
            if pos >= chars.len() {
                return Err(Error::parse(
                    line_no,
                    format!("missing value for header key '{key}'"),
                ));
            }
            let quoted = chars[pos] == '"';
            let text = read_token(&chars, &mut pos, line_no, false)?;
            pairs.push((key, Some(RawValue { text, quoted })));
        } else {
            pairs.push((key, None));
        }
    }

    Ok(pairs)
}

fn skip_whitespace(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

fn read_token(chars: &[char], pos: &mut usize, line_no: usize, is_key: bool) -> Result<String, Error> {
    match chars[*pos] {
        '"' => read_quoted(chars, pos, line_no),
        '{' if !is_key => read_bracketed(chars, pos, '}', line_no),
        '[' if !is_key => read_bracketed(chars, pos, ']', line_no),
        _ => {
            let start = *pos;
            while *pos < chars.len()
                && !chars[*pos].is_whitespace()
                && !(is_key && chars[*pos] == '=')
            {
                *pos += 1;
            }
            Ok(chars[start..*pos].iter().collect())
        }
    }
}

fn read_quoted(chars: &[char], pos: &mut usize, line_no: usize) -> Result<String, Error> {
    let mut out = String::new();
    *pos += 1;
    while *pos < chars.len() {
        match chars[*pos] {
            '"' => {
                *pos += 1;
                return Ok(out);
            }
            '\\' if *pos + 1 < chars.len() => {
                let next = chars[*pos + 1];
                if next != '"' && next != '\\' {
                    out.push('\\');
                }
                out.push(next);
                *pos += 2;
            }
            c => {
                out.push(c);
                *pos += 1;
            }
        }
    }
    Err(Error::parse(line_no, "unterminated quoted string in header"))
}

fn read_bracketed(chars: &[char], pos: &mut usize, close: char, line_no: usize) -> Result<String, Error> {
    let start = *pos + 1;
    let end = chars[start..]
        .iter()
        .position(|&c| c == close)
        .map(|offset| start + offset)
        .ok_or_else(|| Error::parse(line_no, format!("missing closing '{close}' in header")))?;
    *pos = end + 1;
    let inner: String = chars[start..end]
        .iter()
        .map(|&c| if c == ',' { ' ' } else { c })
        .collect();
    Ok(inner.trim().to_string())
}

fn parse_lattice(value: &str, line_no: usize) -> Result<[[f64; 3]; 3], Error> {
    let numbers = value
        .split_whitespace()
        .map(|t| t.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::parse(line_no, "Lattice must contain only numbers"))?;
    if numbers.len() != 9 {
        return Err(Error::parse(
            line_no,
            format!("Lattice must have 9 components, found {}", numbers.len()),
        ));
    }
    Ok([
        [numbers[0], numbers[1], numbers[2]],
        [numbers[3], numbers[4], numbers[5]],
        [numbers[6], numbers[7], numbers[8]],
    ])
}

fn parse_pbc(value: &str, line_no: usize) -> Result<[bool; 3], Error> {
    let flags = value
        .split_whitespace()
        .map(parse_bool)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::parse(line_no, "pbc must contain only T/F flags"))?;
    match flags.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(Error::parse(
            line_no,
            format!("pbc must have 3 flags, found {}", flags.len()),
        )),
    }
}

fn parse_properties(value: &str, line_no: usize) -> Result<Vec<Property>, Error> {
    let fields: Vec<&str> = value.split(':').collect();
    if fields.len() % 3 != 0 {
        return Err(Error::parse(
            line_no,
            "Properties must be a list of name:type:width triples",
        ));
    }

    fields
        .chunks(3)
        .map(|triple| {
            let name = triple[0];
            let kind = ColumnKind::from_code(triple[1]).ok_or_else(|| {
                Error::parse(
                    line_no,
                    format!("unknown column type '{}' for property '{name}'", triple[1]),
                )
            })?;
            let width = triple[2]
                .parse::<usize>()
                .ok()
                .filter(|&w| w > 0)
                .ok_or_else(|| {
                    Error::parse(
                        line_no,
                        format!("invalid column count '{}' for property '{name}'", triple[2]),
                    )
                })?;
            Ok(Property::new(name, kind, width))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_comment_is_kept_verbatim() {
        let header = parse("  generated by some code  ", 2).unwrap();
        assert_eq!(
            header.info.get("comment"),
            Some(&Value::Str("generated by some code".into()))
        );
        assert!(header.properties.is_none());

        let empty = parse("", 2).unwrap();
        assert!(empty.info.is_empty());
    }

    #[test]
    fn parses_typed_pairs_and_flags() {
        let header = parse("E=-76.43 step=12 converged name=\"water dimer\" relaxed", 2).unwrap();
        assert_eq!(header.info.get("E"), Some(&Value::Float(-76.43)));
        assert_eq!(header.info.get("step"), Some(&Value::Int(12)));
        assert_eq!(header.info.get("converged"), Some(&Value::Bool(true)));
        assert_eq!(header.info.get("relaxed"), Some(&Value::Bool(true)));
        assert_eq!(
            header.info.get("name"),
            Some(&Value::Str("water dimer".into()))
        );
        assert_eq!(
            header.info.keys().collect::<Vec<_>>(),
            vec!["E", "step", "converged", "name", "relaxed"]
        );
    }

    #[test]
    fn parses_spaces_around_equals_and_brackets() {
        let header = parse("E = 1.5 dipole=[0.1, 0.2, 0.3] tag={a b}", 2).unwrap();
        assert_eq!(header.info.get("E"), Some(&Value::Float(1.5)));
        assert_eq!(
            header.info.get("dipole"),
            Some(&Value::Floats(vec![0.1, 0.2, 0.3]))
        );
        assert_eq!(header.info.get("tag"), Some(&Value::Str("a b".into())));
    }

    #[test]
    fn quoted_scalars_stay_strings() {
        let header = parse(r#"id="42" flag="T" E="-1.5" forces="0.1 0.2 0.3""#, 2).unwrap();
        assert_eq!(header.info.get("id"), Some(&Value::Str("42".into())));
        assert_eq!(header.info.get("flag"), Some(&Value::Str("T".into())));
        assert_eq!(header.info.get_f64("E"), Ok(-1.5));
        assert_eq!(
            header.info.get("forces"),
            Some(&Value::Floats(vec![0.1, 0.2, 0.3]))
        );
    }

    #[test]
    fn parses_escaped_quotes() {
        let header = parse(r#"note="say \"hi\" \\ bye""#, 2).unwrap();
        assert_eq!(
            header.info.get("note"),
            Some(&Value::Str(r#"say "hi" \ bye"#.into()))
        );
    }

    #[test]
    fn special_keys_do_not_land_in_info() {
        let header = parse(
            r#"Lattice="10 0 0 0 11 0 0 0 12" Properties=species:S:1:pos:R:3:frc:R:3 pbc="T T F" energy=-2.5"#,
            2,
        )
        .unwrap();
        assert_eq!(
            header.lattice,
            Some([[10.0, 0.0, 0.0], [0.0, 11.0, 0.0], [0.0, 0.0, 12.0]])
        );
        assert_eq!(header.pbc, Some([true, true, false]));
        let props = header.properties.unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props[2], Property::new("frc", ColumnKind::Real, 3));
        assert_eq!(header.info.keys().collect::<Vec<_>>(), vec!["energy"]);
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(parse(r#"name="unterminated"#, 7).is_err());
        assert!(parse("E=", 7).is_err());
        assert!(parse("=5", 7).is_err());
        assert!(parse(r#"Lattice="1 2 3""#, 7).is_err());
        assert!(parse(r#"pbc="T T""#, 7).is_err());
        assert!(parse("Properties=species:S:1:pos:R", 7).is_err());
        assert!(parse("Properties=species:X:1", 7).is_err());
        assert!(parse("Properties=species:S:0", 7).is_err());

        match parse("dipole=[1 2", 7).unwrap_err() {
            Error::Parse { line, .. } => assert_eq!(line, 7),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
