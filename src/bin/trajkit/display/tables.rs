use std::collections::BTreeMap;
use std::io::{self, Write};

use trajkit::{ConvertConfig, Element, Frame};

use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_trajectory_info(title: &str, frames: &[Frame]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_kv_table(&mut out, title, &trajectory_rows(frames));
}

pub fn print_conversion_summary(config: &ConvertConfig, frames: usize) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = vec![
        ("Frames", frames.to_string()),
        ("Units", format!("{} → {}", config.from, config.to)),
        ("Factor", format!("{}", config.factor())),
        (
            "Energy",
            format!("{} → {}", config.energy_key, config.energy_output),
        ),
        ("Forces", format!("coords → {}", config.forces_output)),
    ];

    print_kv_table(&mut out, "Conversion", &rows);
}

fn trajectory_rows(frames: &[Frame]) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Frames", frames.len().to_string())];

    let Some(first) = frames.first() else {
        return rows;
    };

    let (min_atoms, max_atoms) = frames
        .iter()
        .map(Frame::atom_count)
        .fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
    let atoms = if min_atoms == max_atoms {
        min_atoms.to_string()
    } else {
        format!("{min_atoms}–{max_atoms}")
    };
    rows.push(("Atoms / Frame", atoms));
    rows.push(("Composition", formula(&first.composition())));

    if first.is_periodic() {
        let pbc: String = first.pbc.iter().map(|&p| if p { 'T' } else { 'F' }).collect();
        rows.push(("PBC", pbc));
    }

    let keys: Vec<&str> = first.info.keys().collect();
    if !keys.is_empty() {
        rows.push(("Metadata", keys.join(", ")));
    }

    let arrays: Vec<&str> = first.arrays().iter().map(|(key, _)| key).collect();
    if !arrays.is_empty() {
        rows.push(("Arrays", arrays.join(", ")));
    }

    rows
}

/// Hill-like formula: counts in atomic-number order, `1` omitted.
fn formula(composition: &BTreeMap<Element, usize>) -> String {
    composition
        .iter()
        .map(|(element, &count)| {
            if count == 1 {
                element.symbol().to_string()
            } else {
                format!("{}{}", element.symbol(), count)
            }
        })
        .collect()
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
