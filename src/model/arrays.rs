use std::fmt;
use thiserror::Error;

use super::atom::Vec3;

/// Column type of a per-atom property, with its extended XYZ type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Real,
    Int,
    Bool,
    Str,
}

impl ColumnKind {
    pub fn code(&self) -> char {
        match self {
            ColumnKind::Real => 'R',
            ColumnKind::Int => 'I',
            ColumnKind::Bool => 'L',
            ColumnKind::Str => 'S',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(ColumnKind::Real),
            "I" => Some(ColumnKind::Int),
            "L" => Some(ColumnKind::Bool),
            "S" => Some(ColumnKind::Str),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Real => "real",
            ColumnKind::Int => "integer",
            ColumnKind::Bool => "logical",
            ColumnKind::Str => "string",
        };
        f.write_str(name)
    }
}

/// Upper bound on up-front reservations; larger arrays grow as rows arrive.
const MAX_RESERVED_VALUES: usize = 1 << 16;

/// A per-atom array stored row-major: `width` entries per atom.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Real { width: usize, values: Vec<f64> },
    Int { width: usize, values: Vec<i64> },
    Bool { width: usize, values: Vec<bool> },
    Str { width: usize, values: Vec<String> },
}

impl ArrayData {
    /// An array with no rows yet, reserving room for about `rows` of them.
    pub fn empty(kind: ColumnKind, width: usize, rows: usize) -> Self {
        let cap = width.checked_mul(rows).unwrap_or(0).min(MAX_RESERVED_VALUES);
        match kind {
            ColumnKind::Real => ArrayData::Real {
                width,
                values: Vec::with_capacity(cap),
            },
            ColumnKind::Int => ArrayData::Int {
                width,
                values: Vec::with_capacity(cap),
            },
            ColumnKind::Bool => ArrayData::Bool {
                width,
                values: Vec::with_capacity(cap),
            },
            ColumnKind::Str => ArrayData::Str {
                width,
                values: Vec::with_capacity(cap),
            },
        }
    }

    /// One 3-vector per atom.
    pub fn vectors(rows: &[Vec3]) -> Self {
        ArrayData::Real {
            width: 3,
            values: rows.iter().flatten().copied().collect(),
        }
    }

    /// One real number per atom.
    pub fn scalars(values: Vec<f64>) -> Self {
        ArrayData::Real { width: 1, values }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ArrayData::Real { .. } => ColumnKind::Real,
            ArrayData::Int { .. } => ColumnKind::Int,
            ArrayData::Bool { .. } => ColumnKind::Bool,
            ArrayData::Str { .. } => ColumnKind::Str,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            ArrayData::Real { width, .. }
            | ArrayData::Int { width, .. }
            | ArrayData::Bool { width, .. }
            | ArrayData::Str { width, .. } => *width,
        }
    }

    fn len(&self) -> usize {
        match self {
            ArrayData::Real { values, .. } => values.len(),
            ArrayData::Int { values, .. } => values.len(),
            ArrayData::Bool { values, .. } => values.len(),
            ArrayData::Str { values, .. } => values.len(),
        }
    }

    /// Number of atoms covered, or `None` if the data is ragged.
    pub fn rows(&self) -> Option<usize> {
        let width = self.width();
        if width == 0 {
            return None;
        }
        let len = self.len();
        (len % width == 0).then_some(len / width)
    }

    pub fn as_real(&self) -> Option<&[f64]> {
        match self {
            ArrayData::Real { values, .. } => Some(values),
            _ => None,
        }
    }

    /// The 3-vector of atom `i`, for real arrays of width 3.
    pub fn vector(&self, i: usize) -> Option<Vec3> {
        match self {
            ArrayData::Real { width: 3, values } => {
                let row = values.get(3 * i..3 * i + 3)?;
                Some([row[0], row[1], row[2]])
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("array '{key}' has {found} rows but the frame has {expected} atoms")]
    LengthMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("array '{key}' has {len} values, which is not a multiple of its width {width}")]
    Ragged { key: String, len: usize, width: usize },

    #[error("'{0}' is reserved for species and positions and cannot name a per-atom array")]
    Reserved(String),
}

pub(crate) const RESERVED_KEYS: [&str; 2] = ["species", "pos"];

/// Per-atom arrays of a frame: an insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrays {
    entries: Vec<(String, ArrayData)>,
}

impl Arrays {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ArrayData> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArrayData)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts after checking that `data` has exactly `rows` atoms.
    pub(crate) fn insert_checked(
        &mut self,
        key: String,
        data: ArrayData,
        rows: usize,
    ) -> Result<Option<ArrayData>, ArrayError> {
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(ArrayError::Reserved(key));
        }
        let found = data.rows().ok_or_else(|| ArrayError::Ragged {
            key: key.clone(),
            len: data.len(),
            width: data.width(),
        })?;
        if found != rows {
            return Err(ArrayError::LengthMismatch {
                key,
                expected: rows,
                found,
            });
        }

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Ok(Some(std::mem::replace(slot, data))),
            None => {
                self.entries.push((key, data));
                Ok(None)
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<ArrayData> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_flatten_row_major() {
        let data = ArrayData::vectors(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(data.width(), 3);
        assert_eq!(data.rows(), Some(2));
        assert_eq!(data.vector(1), Some([4.0, 5.0, 6.0]));
        assert_eq!(data.vector(2), None);
        assert_eq!(data.as_real().unwrap().len(), 6);
    }

    #[test]
    fn ragged_and_zero_width_have_no_rows() {
        let ragged = ArrayData::Int {
            width: 2,
            values: vec![1, 2, 3],
        };
        assert_eq!(ragged.rows(), None);

        let zero = ArrayData::Bool {
            width: 0,
            values: vec![],
        };
        assert_eq!(zero.rows(), None);
    }

    #[test]
    fn insert_checked_validates_length_and_reserved_names() {
        let mut arrays = Arrays::default();

        let err = arrays
            .insert_checked("frc".into(), ArrayData::scalars(vec![1.0, 2.0]), 3)
            .unwrap_err();
        assert_eq!(
            err,
            ArrayError::LengthMismatch {
                key: "frc".into(),
                expected: 3,
                found: 2
            }
        );

        let err = arrays
            .insert_checked("pos".into(), ArrayData::scalars(vec![1.0]), 1)
            .unwrap_err();
        assert_eq!(err, ArrayError::Reserved("pos".into()));

        let prev = arrays
            .insert_checked("q".into(), ArrayData::scalars(vec![0.5]), 1)
            .unwrap();
        assert!(prev.is_none());
        let prev = arrays
            .insert_checked("q".into(), ArrayData::scalars(vec![0.25]), 1)
            .unwrap();
        assert_eq!(prev, Some(ArrayData::scalars(vec![0.5])));
        assert_eq!(arrays.len(), 1);
    }

    #[test]
    fn column_kind_codes_roundtrip() {
        for kind in [
            ColumnKind::Real,
            ColumnKind::Int,
            ColumnKind::Bool,
            ColumnKind::Str,
        ] {
            let code = kind.code().to_string();
            assert_eq!(ColumnKind::from_code(&code), Some(kind));
        }
        assert_eq!(ColumnKind::from_code("X"), None);
    }
}
