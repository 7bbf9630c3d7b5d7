use std::io::{BufRead, Lines};

use super::header::{self, Property};
use crate::io::error::Error;
use crate::model::{
    arrays::{ArrayData, ColumnKind},
    atom::Atom,
    element::Element,
    frame::Frame,
    info::parse_bool,
};

const MAX_RESERVED_ATOMS: usize = 4096;

/// Streams frames out of a multi-frame XYZ or extended XYZ source.
pub struct XyzReader<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> XyzReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, Error> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, what: &str) -> Result<String, Error> {
        self.next_line()?.ok_or_else(|| {
            Error::parse(
                self.line_no + 1,
                format!("unexpected end of file, expected {what}"),
            )
        })
    }

    pub fn read_frame(&mut self) -> Result<Option<Frame>, Error> {
        let count_line = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        let count_line_no = self.line_no;
        let atom_count = count_line.trim().parse::<usize>().map_err(|_| {
            Error::parse(
                count_line_no,
                format!("expected an atom count, found '{}'", count_line.trim()),
            )
        })?;

        let header_line = self.expect_line("the frame header line")?;
        let header = header::parse(&header_line, self.line_no)?;

        let (properties, strict) = match header.properties {
            Some(props) => (props, true),
            None => (header::default_properties(), false),
        };
        let layout = ColumnLayout::new(properties, self.line_no)?;

        // The count line is untrusted until the atom lines have been read.
        let reserve = atom_count.min(MAX_RESERVED_ATOMS);
        let mut atoms = Vec::with_capacity(reserve);
        let mut columns: Vec<ArrayData> = layout
            .extra
            .iter()
            .map(|p| ArrayData::empty(p.kind, p.width, reserve))
            .collect();

        for i in 0..atom_count {
            let line = self.expect_line(&format!("atom {} of {}", i + 1, atom_count))?;
            let atom = layout.parse_atom_line(&line, self.line_no, strict, &mut columns)?;
            atoms.push(atom);
        }

        let mut frame = Frame::new(atoms);
        frame.info = header.info;
        frame.lattice = header.lattice;
        frame.pbc = header
            .pbc
            .unwrap_or(if header.lattice.is_some() { [true; 3] } else { [false; 3] });

        for (property, data) in layout.extra.into_iter().zip(columns) {
            frame
                .set_array(property.name, data)
                .map_err(|e| Error::parse(count_line_no, e.to_string()))?;
        }

        Ok(Some(frame))
    }
}

impl<R: BufRead> Iterator for XyzReader<R> {
    type Item = Result<Frame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.read_frame().transpose();
        if matches!(result, Some(Err(_))) {
            self.failed = true;
        }
        result
    }
}

/// Reads every frame of a trajectory into memory.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Frame>, Error> {
    XyzReader::new(reader).collect()
}

struct ColumnLayout {
    species_offset: usize,
    pos_offset: usize,
    extra: Vec<Property>,
    extra_offsets: Vec<usize>,
    total: usize,
}

impl ColumnLayout {
    fn new(properties: Vec<Property>, line_no: usize) -> Result<Self, Error> {
        let mut species_offset = None;
        let mut pos_offset = None;
        let mut extra = Vec::new();
        let mut extra_offsets = Vec::new();
        let mut offset: usize = 0;

        for property in properties {
            let width = property.width;
            match property.name.as_str() {
                "species" => {
                    if property.kind != ColumnKind::Str || width != 1 {
                        return Err(Error::parse(line_no, "species must be declared as S:1"));
                    }
                    species_offset = Some(offset);
                }
                "pos" => {
                    if property.kind != ColumnKind::Real || width != 3 {
                        return Err(Error::parse(line_no, "pos must be declared as R:3"));
                    }
                    pos_offset = Some(offset);
                }
                name => {
                    if extra.iter().any(|p: &Property| p.name == name) {
                        return Err(Error::parse(
                            line_no,
                            format!("property '{name}' is declared twice"),
                        ));
                    }
                    extra_offsets.push(offset);
                    extra.push(property);
                }
            }
            offset = offset.checked_add(width).ok_or_else(|| {
                Error::parse(line_no, "Properties declares too many columns")
            })?;
        }

        let species_offset = species_offset
            .ok_or_else(|| Error::parse(line_no, "Properties does not declare species"))?;
        let pos_offset =
            pos_offset.ok_or_else(|| Error::parse(line_no, "Properties does not declare pos"))?;

        Ok(Self {
            species_offset,
            pos_offset,
            extra,
            extra_offsets,
            total: offset,
        })
    }

    fn parse_atom_line(
        &self,
        line: &str,
        line_no: usize,
        strict: bool,
        columns: &mut [ArrayData],
    ) -> Result<Atom, Error> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < self.total || (strict && tokens.len() > self.total) {
            return Err(Error::parse(
                line_no,
                format!(
                    "atom line has {} columns, expected {}",
                    tokens.len(),
                    self.total
                ),
            ));
        }

        let symbol = tokens[self.species_offset];
        let element = Element::from_symbol_ignore_case(symbol)
            .map_err(|e| Error::parse(line_no, e.to_string()))?;

        let mut position = [0.0; 3];
        for (k, slot) in position.iter_mut().enumerate() {
            let token = tokens[self.pos_offset + k];
            *slot = token.parse().map_err(|_| {
                Error::parse(line_no, format!("invalid coordinate '{token}'"))
            })?;
        }

        for ((property, &offset), data) in self.extra.iter().zip(&self.extra_offsets).zip(columns) {
            for token in &tokens[offset..offset + property.width] {
                push_token(data, token).map_err(|kind| {
                    Error::parse(
                        line_no,
                        format!("invalid {kind} value '{token}' in column '{}'", property.name),
                    )
                })?;
            }
        }

        Ok(Atom::new(element, position))
    }
}

fn push_token(data: &mut ArrayData, token: &str) -> Result<(), ColumnKind> {
    match data {
        ArrayData::Real { values, .. } => {
            values.push(token.parse().map_err(|_| ColumnKind::Real)?);
        }
        ArrayData::Int { values, .. } => {
            values.push(token.parse().map_err(|_| ColumnKind::Int)?);
        }
        ArrayData::Bool { values, .. } => {
            values.push(parse_bool(token).ok_or(ColumnKind::Bool)?);
        }
        ArrayData::Str { values, .. } => values.push(token.to_string()),
    }
    Ok(())
}
