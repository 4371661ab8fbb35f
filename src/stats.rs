//! Group-by aggregation and distribution statistics over a [`LaptopTable`].

use std::collections::{BTreeMap, BTreeSet};

use crate::data::model::{CellValue, Column, LaptopTable, PriceCategory};

// ---------------------------------------------------------------------------
// Group-by
// ---------------------------------------------------------------------------

/// Distinct non-null values of `column` in plotting order: numbers
/// ascending, text in order of first appearance.
pub fn categories(table: &LaptopTable, column: Column) -> Vec<CellValue> {
    let mut seen = BTreeSet::new();
    let mut keys: Vec<CellValue> = table
        .rows
        .iter()
        .map(|row| column.value(row))
        .filter(|key| !key.is_null() && seen.insert(key.clone()))
        .collect();
    if keys.iter().all(CellValue::is_numeric) {
        keys.sort();
    }
    keys
}

/// Prices grouped by the value of `column`, in [`categories`] order. Rows
/// whose key is null are dropped, so e.g. listings with an unparsed storage
/// size never show up in storage charts.
pub fn group_prices(table: &LaptopTable, column: Column) -> Vec<(CellValue, Vec<f64>)> {
    let mut groups: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for row in &table.rows {
        let key = column.value(row);
        if key.is_null() {
            continue;
        }
        groups.entry(key).or_default().push(row.price);
    }
    categories(table, column)
        .into_iter()
        .filter_map(|key| groups.remove(&key).map(|prices| (key, prices)))
        .collect()
}

/// Prices grouped by `x`, then by `hue` within each `x` group. The outer
/// groups follow [`categories`] order.
pub fn group_prices_by_hue(
    table: &LaptopTable,
    x: Column,
    hue: Column,
) -> Vec<(CellValue, BTreeMap<CellValue, Vec<f64>>)> {
    let mut groups: BTreeMap<CellValue, BTreeMap<CellValue, Vec<f64>>> = BTreeMap::new();
    for row in &table.rows {
        let (x_key, hue_key) = (x.value(row), hue.value(row));
        if x_key.is_null() || hue_key.is_null() {
            continue;
        }
        groups
            .entry(x_key)
            .or_default()
            .entry(hue_key)
            .or_default()
            .push(row.price);
    }
    categories(table, x)
        .into_iter()
        .filter_map(|key| groups.remove(&key).map(|inner| (key, inner)))
        .collect()
}

/// Mean price per group of `column`, most expensive group first.
pub fn average_by(table: &LaptopTable, column: Column) -> Vec<(CellValue, f64)> {
    let mut averages: Vec<(CellValue, f64)> = group_prices(table, column)
        .into_iter()
        .map(|(key, prices)| {
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            (key, mean)
        })
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    averages
}

/// Number of listings per price category, largest first.
///
/// Every category is present, including empty ones. Ties keep the
/// cheapest-first category order.
pub fn segment_counts(table: &LaptopTable) -> Vec<(PriceCategory, usize)> {
    let mut counts: Vec<(PriceCategory, usize)> = PriceCategory::ALL
        .iter()
        .map(|&cat| {
            let n = table
                .rows
                .iter()
                .filter(|r| r.price_category == Some(cat))
                .count();
            (cat, n)
        })
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Distribution statistics
// ---------------------------------------------------------------------------

/// Quantile `q` (0..=1) of an ascending slice, interpolating linearly
/// between the two closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Five-number summary for a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value within `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Highest value within `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;

        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let mut inside = sorted
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let whisker_low = inside.next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(whisker_low);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    /// Smallest and largest value drawn, outliers included.
    pub fn extent(&self) -> (f64, f64) {
        let low = self.outliers.iter().copied().fold(self.whisker_low, f64::min);
        let high = self.outliers.iter().copied().fold(self.whisker_high, f64::max);
        (low, high)
    }
}

/// One histogram bar, `[start, end)` except for the last bin which is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Upper bound on histogram bins. A tight cluster with a far outlier makes
/// the Freedman–Diaconis width tiny; past this many bins Sturges is used.
pub const MAX_BINS: usize = 1000;

/// Histogram with an automatically chosen bin width: the smaller of the
/// Freedman–Diaconis and Sturges estimates (Sturges alone when the IQR is 0
/// or the estimate would exceed [`MAX_BINS`]).
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    let sorted = sorted_finite(values);
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    if max == min {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
            count: sorted.len(),
        }];
    }

    let n = sorted.len() as f64;
    let range = max - min;
    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile(&sorted, 0.75).unwrap_or(max) - quantile(&sorted, 0.25).unwrap_or(min);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let mut width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    if range / width > MAX_BINS as f64 {
        width = sturges;
    }

    let n_bins = ((range / width).ceil() as usize).clamp(1, MAX_BINS);
    let width = range / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for v in &sorted {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}
