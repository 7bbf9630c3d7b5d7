use std::io::Write;

use anyhow::Result;
use trajkit::analysis::Histogram;

use crate::util::text::scaled_bar;

/// Text rendering: one header line per element, then one line per bin.
pub fn write_histogram_text(out: &mut impl Write, hist: &Histogram, width: usize) -> Result<()> {
    let stats = &hist.stats;
    writeln!(
        out,
        "{}  samples={}  min={:.6}  max={:.6}  mean={:.6}",
        hist.element, stats.count, stats.min, stats.max, stats.mean
    )?;

    let max = hist.max_count();
    let last = hist.counts.len().saturating_sub(1);
    for (i, (start, end, count)) in hist.bins().enumerate() {
        let close = if i == last { ']' } else { ')' };
        writeln!(
            out,
            "  [{start:>14.6}, {end:>14.6}{close} {count:>8} {}",
            scaled_bar(count, max, width)
        )?;
    }
    writeln!(out)?;

    Ok(())
}

pub fn write_histogram_csv<W: Write>(writer: W, histograms: &[Histogram]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["element", "bin_start", "bin_end", "count"])?;

    for hist in histograms {
        let symbol = hist.element.symbol();
        for (start, end, count) in hist.bins() {
            wtr.write_record(&[
                symbol.to_string(),
                start.to_string(),
                end.to_string(),
                count.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajkit::Element;
    use trajkit::analysis::{HistogramConfig, element_histograms};
    use trajkit::io::read_trajectory;

    const ANNOTATED: &str = "\
2
Properties=species:S:1:pos:R:3:node_energy:R:1
O 0.0 0.0 0.0 -2.0
H 0.0 0.0 1.0 1.0
2
Properties=species:S:1:pos:R:3:node_energy:R:1
O 0.0 0.0 0.0 -4.0
H 0.0 0.0 1.0 3.0
";

    fn histograms() -> Vec<Histogram> {
        let frames = read_trajectory(ANNOTATED.as_bytes()).unwrap();
        let config = HistogramConfig {
            elements: vec![Element::H, Element::O],
            bins: 2,
            ..HistogramConfig::default()
        };
        element_histograms(&frames, &config).unwrap()
    }

    #[test]
    fn csv_has_one_row_per_bin() {
        let mut out = Vec::new();
        write_histogram_csv(&mut out, &histograms()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "element,bin_start,bin_end,count",
                "H,1,2,1",
                "H,2,3,1",
                "O,-4,-3,1",
                "O,-3,-2,1",
            ]
        );
    }

    #[test]
    fn text_closes_the_last_bin() {
        let mut out = Vec::new();
        write_histogram_text(&mut out, &histograms()[0], 10).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("H  samples=2"));
        assert!(lines[1].contains(')'));
        assert!(lines[2].contains(']'));
        assert!(lines[2].ends_with(&"█".repeat(10)));
    }
}
