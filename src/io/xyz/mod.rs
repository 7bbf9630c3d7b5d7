mod header;
pub mod reader;
pub mod writer;

/// Comment-line keys that describe the frame itself rather than metadata.
pub(crate) const FRAME_KEYS: [&str; 3] =
    [header::LATTICE_KEY, header::PBC_KEY, header::PROPERTIES_KEY];

/// Why `key` cannot be written as an extended XYZ key, if it cannot.
pub(crate) fn key_problem(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        return Some("keys must not be empty");
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '=' | '"' | ':'))
    {
        return Some("keys must not contain whitespace, '=', ':' or quotes");
    }
    None
}
