pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if max_len == 1 {
        return "…".to_string();
    }

    if s.char_indices().nth(max_len).is_none() {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .nth(max_len - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    format!("{}…", &s[..cut])
}

/// Bar of `count / max` scaled to `width` cells; non-zero counts get at least one cell.
pub fn scaled_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let cells = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width.max(1)))
}

/// File name for progress lines, falling back to the full path.
pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("frame 3 has no key", 10), vec!["frame 3", "has no key"]);
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("energy", 10), "energy");
        assert_eq!(truncate("energy", 6), "energy");
        assert_eq!(truncate("node_energy", 5), "node…");
        assert_eq!(truncate("Å·eV·Å", 3), "Å·…");
    }

    #[test]
    fn bars_scale_to_the_largest_count() {
        assert_eq!(scaled_bar(10, 10, 4), "████");
        assert_eq!(scaled_bar(5, 10, 4), "██");
        assert_eq!(scaled_bar(1, 1000, 4), "█");
        assert_eq!(scaled_bar(0, 10, 4), "");
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("runs/a/pos.xyz")), "pos.xyz");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
