use std::fmt;
use thiserror::Error;

/// A scalar metadata value from an extended XYZ header.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Floats(Vec<f64>),
}

impl Value {
    /// Interprets the (unquoted) text of a header value.
    ///
    /// Integers win over floats, floats over booleans. A value made of several
    /// whitespace-separated numbers becomes a float list; anything else is kept
    /// as a string.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = trimmed.parse::<f64>() {
            return Value::Float(v);
        }
        if let Some(b) = parse_bool(trimmed) {
            return Value::Bool(b);
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() > 1 {
            let numbers: Option<Vec<f64>> = tokens.iter().map(|t| t.parse().ok()).collect();
            if let Some(numbers) = numbers {
                return Value::Floats(numbers);
            }
        }

        Value::Str(raw.to_string())
    }

    /// Interprets a header value that was written inside `"..."`.
    ///
    /// Quoting keeps scalars textual (`"42"` stays a string); several numbers
    /// still form a float list.
    pub fn parse_quoted(raw: &str) -> Self {
        match Value::parse(raw) {
            list @ Value::Floats(_) => list,
            _ => Value::Str(raw.to_string()),
        }
    }

    /// Numeric view of the value. Strings are parsed, booleans and lists are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Floats(_) => None,
        }
    }
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "T" | "True" | "TRUE" | "true" => Some(true),
        "F" | "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("T"),
            Value::Bool(false) => f.write_str("F"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Floats(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{v:?}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfoError {
    #[error("metadata key '{key}' is not present")]
    Missing { key: String },

    #[error("metadata key '{key}' holds '{raw}', which is not a number")]
    NotNumeric { key: String, raw: String },
}

/// Per-frame metadata: an insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    entries: Vec<(String, Value)>,
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`. An existing entry keeps its position and
    /// its previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, InfoError> {
        let value = self.get(key).ok_or_else(|| InfoError::Missing {
            key: key.to_string(),
        })?;
        value.as_f64().ok_or_else(|| InfoError::NotNumeric {
            key: key.to_string(),
            raw: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefers_int_then_float_then_bool() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse("-76.4"), Value::Float(-76.4));
        assert_eq!(Value::parse("1e-3"), Value::Float(1e-3));
        assert_eq!(Value::parse("T"), Value::Bool(true));
        assert_eq!(Value::parse("False"), Value::Bool(false));
    }

    #[test]
    fn parse_number_lists_and_strings() {
        assert_eq!(
            Value::parse("1.0 2 3.5"),
            Value::Floats(vec![1.0, 2.0, 3.5])
        );
        assert_eq!(Value::parse("N/A"), Value::Str("N/A".into()));
        assert_eq!(Value::parse("hello world"), Value::Str("hello world".into()));
    }

    #[test]
    fn quoted_values_keep_scalars_as_text() {
        assert_eq!(Value::parse_quoted("42"), Value::Str("42".into()));
        assert_eq!(Value::parse_quoted("F"), Value::Str("F".into()));
        assert_eq!(
            Value::parse_quoted("1 2"),
            Value::Floats(vec![1.0, 2.0])
        );
    }

    #[test]
    fn display_keeps_floats_distinguishable_from_ints() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Int(2).to_string(), "2");
        assert_eq!(Value::Floats(vec![1.0, -0.5]).to_string(), "1.0 -0.5");
        assert_eq!(Value::Bool(false).to_string(), "F");
    }

    #[test]
    fn insert_replaces_in_place_and_remove_preserves_order() {
        let mut info = Info::new();
        info.insert("a", 1i64);
        info.insert("b", 2.5);
        info.insert("c", "x");

        let old = info.insert("a", 10i64);
        assert_eq!(old, Some(Value::Int(1)));
        assert_eq!(info.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        assert_eq!(info.remove("b"), Some(Value::Float(2.5)));
        assert_eq!(info.remove("b"), None);
        assert_eq!(info.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn get_f64_reports_missing_and_non_numeric() {
        let mut info = Info::new();
        info.insert("E", -1.5);
        info.insert("bad", "N/A");
        info.insert("flag", true);
        info.insert("text", " 3.25 ");

        assert_eq!(info.get_f64("E"), Ok(-1.5));
        assert_eq!(info.get_f64("text"), Ok(3.25));
        assert_eq!(
            info.get_f64("missing"),
            Err(InfoError::Missing {
                key: "missing".into()
            })
        );
        assert_eq!(
            info.get_f64("bad"),
            Err(InfoError::NotNumeric {
                key: "bad".into(),
                raw: "N/A".into()
            })
        );
        assert!(matches!(
            info.get_f64("flag"),
            Err(InfoError::NotNumeric { raw, .. }) if raw == "T"
        ));
    }
}
