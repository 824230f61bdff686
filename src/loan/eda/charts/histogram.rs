use std::num::NonZeroUsize;

use serde::Serialize;

/// One equal-width bucket of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Partitions `values` into `bins` equal-width buckets spanning the observed
/// `[min, max]`.
///
/// Bins are half-open except the last, which also holds `max`. No values
/// produce no bins; a single distinct value produces one zero-width bin.
pub fn bin_values(values: &[f64], bins: NonZeroUsize) -> Vec<Bin> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };

    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    // Scaled before subtracting so ranges near f64::MAX stay finite.
    let bins = bins.get();
    let width = max / bins as f64 - min / bins as f64;
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (value / width - min / width).floor() as usize;
        counts[index.min(bins - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| Bin {
            lower: min + width * index as f64,
            upper: if index + 1 == bins {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count,
        })
        .collect()
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}
