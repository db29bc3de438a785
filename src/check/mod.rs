//! Threshold evaluation for a single metric point.

use crate::metrics::{MetricSink, normalize_point, numeric_value};
use anyhow::{Result, anyhow};
use std::fmt;
use std::process::ExitCode;

/// Monitoring-plugin state; the discriminant is the process exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    Ok = 0,
    Warning = 1,
    Critical = 2,
}

impl CheckState {
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl From<CheckState> for ExitCode {
    fn from(state: CheckState) -> Self {
        Self::from(state.code())
    }
}

/// Warning/critical boundaries, both inclusive. `critical` is always above `warning`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    warning: f64,
    critical: f64,
}

impl Threshold {
    /// # Errors
    ///
    /// Returns an error unless `critical` is strictly greater than `warning`.
    pub fn new(warning: f64, critical: f64) -> Result<Self> {
        if critical > warning {
            Ok(Self { warning, critical })
        } else {
            Err(anyhow!("--critical threshold must be larger than --warning threshold"))
        }
    }

    #[must_use]
    pub const fn warning(&self) -> f64 {
        self.warning
    }

    #[must_use]
    pub const fn critical(&self) -> f64 {
        self.critical
    }

    #[must_use]
    pub fn classify(&self, value: f64) -> CheckState {
        if value >= self.critical {
            CheckState::Critical
        } else if value >= self.warning {
            CheckState::Warning
        } else {
            CheckState::Ok
        }
    }
}

/// Verdict for one requested point.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    Classified {
        state: CheckState,
        point: String,
        value: f64,
    },
    NotFound {
        point: String,
    },
}

impl Evaluation {
    /// Exit state for this verdict; a missing point reports as a warning.
    #[must_use]
    pub const fn state(&self) -> CheckState {
        match self {
            Self::Classified { state, .. } => *state,
            Self::NotFound { .. } => CheckState::Warning,
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classified {
                state,
                point,
                value,
            } => write!(f, "{}: {point} = {value:.6}", state.label()),
            Self::NotFound { point } => write!(f, "point not found: {point}"),
        }
    }
}

/// Classify the last value recorded for `point`.
#[must_use]
pub fn evaluate(sink: &MetricSink, point: &str, threshold: &Threshold) -> Evaluation {
    let point = normalize_point(point);

    match sink.last(&point) {
        Some(metric) => {
            let value = numeric_value(&metric.value);
            Evaluation::Classified {
                state: threshold.classify(value),
                point,
                value,
            }
        }
        None => Evaluation::NotFound { point },
    }
}
