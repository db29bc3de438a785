//! Metric points accumulated during one collection run.

pub mod output;

/// One collected point. Values keep the literal text the server printed;
/// numeric parsing happens only when a consumer needs a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metric {
    pub point: String,
    pub value: String,
}

/// Append-only, ordered list of metrics for a single run.
///
/// Points are not deduplicated; lookups return the last match.
#[derive(Clone, Debug, Default)]
pub struct MetricSink {
    metrics: Vec<Metric>,
}

impl MetricSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a metric and return the stored (lower-cased) point name.
    /// An empty value is stored as `"0"`.
    pub fn push(&mut self, point: &str, value: &str) -> String {
        let point = normalize_point(point);
        let value = if value.is_empty() { "0" } else { value };

        self.metrics.push(Metric {
            point: point.clone(),
            value: value.to_string(),
        });

        point
    }

    /// Last metric recorded for `point`.
    #[must_use]
    pub fn last(&self, point: &str) -> Option<&Metric> {
        self.metrics.iter().rev().find(|m| m.point == point)
    }

    /// Sum every value whose point starts with `prefix`, skipping `exclude`.
    #[must_use]
    pub fn sum_prefix(&self, prefix: &str, exclude: &str) -> f64 {
        self.metrics
            .iter()
            .filter(|m| m.point.starts_with(prefix) && m.point != exclude)
            .map(|m| numeric_value(&m.value))
            // f64 `sum()` of nothing is -0.0
            .fold(0.0, |acc, v| acc + v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl<'a> IntoIterator for &'a MetricSink {
    type Item = &'a Metric;
    type IntoIter = std::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}

#[must_use]
pub fn normalize_point(point: &str) -> String {
    point.to_lowercase()
}

/// Numeric reading of a stored value; anything unparsable counts as zero.
#[must_use]
pub fn numeric_value(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}
