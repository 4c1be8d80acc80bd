use indexmap::IndexMap;

/// Denominator used for variance and standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceMode {
    /// Divide by N.
    Population,
    /// Divide by N - 1.
    Sample,
}

impl Default for VarianceMode {
    fn default() -> Self {
        VarianceMode::Population
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Every distinct value occurs equally often.
    Absent,
    Single(f64),
    /// Values sharing the highest frequency, in order of first appearance.
    Tied(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsResult {
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    pub range: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl StatisticsResult {
    /// Computes all statistics for `data`, `None` when it is empty.
    ///
    /// Variance and standard deviation are NaN for a single-element sample.
    pub fn compute(data: &[f64], variance_mode: VarianceMode) -> Option<StatisticsResult> {
        let variance = variance(data, variance_mode)?;
        Some(StatisticsResult {
            mean: mean(data)?,
            median: median(data)?,
            mode: mode(data),
            range: range(data)?,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    match sorted.len() % 2 {
        0 => Some((sorted[mid - 1] + sorted[mid]) / 2.),
        _ => Some(sorted[mid]),
    }
}

// -0.0 and 0.0 count as the same value, stored as 0.0
fn normalize_zero(value: f64) -> f64 {
    if value == 0. {
        0.
    } else {
        value
    }
}

pub fn mode(data: &[f64]) -> Mode {
    let mut counts: IndexMap<u64, (f64, usize)> = IndexMap::with_capacity(data.len());
    for value in data.iter().copied().map(normalize_zero) {
        counts.entry(value.to_bits()).or_insert((value, 0)).1 += 1;
    }

    let max_count = match counts.values().map(|(_, count)| *count).max() {
        Some(max_count) => max_count,
        None => return Mode::Absent,
    };
    if counts.values().all(|(_, count)| *count == max_count) {
        return Mode::Absent;
    }

    let mut modes = counts
        .into_iter()
        .filter(|(_, (_, count))| *count == max_count)
        .map(|(_, (value, _))| value)
        .collect::<Vec<_>>();
    match modes.len() {
        1 => Mode::Single(modes.remove(0)),
        _ => Mode::Tied(modes),
    }
}

pub fn range(data: &[f64]) -> Option<f64> {
    let first = *data.first()?;
    let (min, max) = data
        .iter()
        .fold((first, first), |(min, max), value| {
            (min.min(*value), max.max(*value))
        });
    Some(max - min)
}

/// Mean squared deviation, NaN for a sample of one.
pub fn variance(data: &[f64], variance_mode: VarianceMode) -> Option<f64> {
    let mean = mean(data)?;
    let sum_sq = data
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>();
    let denominator = match variance_mode {
        VarianceMode::Population => data.len(),
        VarianceMode::Sample => data.len() - 1,
    };
    if denominator == 0 {
        return Some(f64::NAN);
    }
    Some(sum_sq / denominator as f64)
}

pub fn standard_deviation(data: &[f64], variance_mode: VarianceMode) -> Option<f64> {
    variance(data, variance_mode).map(f64::sqrt)
}
