use crate::model::{arrays::ArrayData, element::Element, frame::Frame};

use super::error::Error;

/// Settings for [`element_histograms`].
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    /// Per-atom scalar array to sample.
    pub key: String,
    /// Elements to report, in output order.
    pub elements: Vec<Element>,
    /// Number of leading frames to use; all frames when `None`.
    pub nframes: Option<usize>,
    pub bins: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            key: "node_energy".to_string(),
            elements: Vec::new(),
            nframes: None,
            bins: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SampleStats {
    fn of(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        Some(Self {
            count: samples.len(),
            min,
            max,
            mean,
        })
    }
}

/// Equal-width histogram of one element's samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub element: Element,
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub stats: SampleStats,
}

impl Histogram {
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Gathers the values of `key` for every atom of each requested element.
///
/// Returns one sample vector per entry of `elements`, in the same order.
pub fn collect_samples(
    frames: &[Frame],
    key: &str,
    elements: &[Element],
    nframes: Option<usize>,
) -> Result<Vec<Vec<f64>>, Error> {
    let limit = match nframes {
        Some(n) if n > frames.len() => {
            return Err(Error::FrameLimit {
                requested: n,
                available: frames.len(),
            });
        }
        Some(n) => n,
        None => frames.len(),
    };

    let mut samples = vec![Vec::new(); elements.len()];
    for (index, frame) in frames[..limit].iter().enumerate() {
        let values = scalar_values(frame, index, key)?;
        for (element, &value) in frame.elements().zip(values) {
            for (slot, _) in elements.iter().enumerate().filter(|(_, e)| **e == element) {
                samples[slot].push(value);
            }
        }
    }

    Ok(samples)
}

fn scalar_values<'a>(frame: &'a Frame, index: usize, key: &str) -> Result<&'a [f64], Error> {
    let data = frame.array(key).ok_or_else(|| Error::MissingArray {
        frame: index,
        key: key.to_string(),
    })?;
    match data {
        ArrayData::Real { width: 1, values } => Ok(values),
        ArrayData::Real { width, .. } => Err(Error::NotScalar {
            key: key.to_string(),
            width: *width,
        }),
        other => Err(Error::NotReal {
            key: key.to_string(),
            kind: other.kind(),
        }),
    }
}

/// Bins samples into `bins` equal-width bins over `[min, max]`.
///
/// The last bin is closed on the right. A degenerate range (all samples
/// equal) is widened to `[v - 0.5, v + 0.5]`.
pub fn bin_samples(samples: &[f64], bins: usize) -> Result<(Vec<f64>, Vec<usize>), Error> {
    if bins == 0 {
        return Err(Error::ZeroBins);
    }
    let Some(stats) = SampleStats::of(samples) else {
        return Ok((Vec::new(), Vec::new()));
    };

    let (lo, hi) = if stats.max > stats.min {
        (stats.min, stats.max)
    } else {
        (stats.min - 0.5, stats.max + 0.5)
    };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + i as f64 * width })
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in samples {
        let idx = (((v - lo) / (hi - lo)) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Ok((edges, counts))
}

/// Per-element histograms of a per-atom scalar array across frames.
///
/// Repeated elements are reported once, at their first position.
pub fn element_histograms(frames: &[Frame], config: &HistogramConfig) -> Result<Vec<Histogram>, Error> {
    if config.bins == 0 {
        return Err(Error::ZeroBins);
    }

    let mut elements: Vec<Element> = Vec::with_capacity(config.elements.len());
    for &element in &config.elements {
        if !elements.contains(&element) {
            elements.push(element);
        }
    }

    let samples = collect_samples(frames, &config.key, &elements, config.nframes)?;

    elements
        .into_iter()
        .zip(samples)
        .map(|(element, values)| {
            let stats = SampleStats::of(&values).ok_or(Error::NoSamples { element })?;
            let (edges, counts) = bin_samples(&values, config.bins)?;
            Ok(Histogram {
                element,
                edges,
                counts,
                stats,
            })
        })
        .collect()
}
