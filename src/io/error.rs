use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse XYZ data: {details} (at line {line})")]
    Parse { line: usize, details: String },

    #[error("cannot write '{key}' in extended XYZ: {details}")]
    Unwritable { key: String, details: String },
}

impl Error {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }

    pub fn unwritable(key: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Unwritable {
            key: key.into(),
            details: details.into(),
        }
    }
}
