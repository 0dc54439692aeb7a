use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AnalysisError;

/// Windows offered as overlay toggles when nothing else is configured.
pub const DEFAULT_SMA_WINDOWS: [usize; 3] = [10, 20, 30];

/// A positive moving-average window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmaWindow(NonZeroUsize);

impl SmaWindow {
    pub fn new(size: usize) -> Result<Self, AnalysisError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| AnalysisError::InvalidWindow {
                value: size.to_string(),
            })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_SMA_WINDOWS
            .iter()
            .filter_map(|&size| Self::new(size).ok())
            .collect()
    }

    /// Display name used for chart traces and summaries.
    pub fn label(self) -> String {
        format!("{}-day SMA", self.0)
    }
}

impl fmt::Display for SmaWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for SmaWindow {
    type Error = AnalysisError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| AnalysisError::InvalidWindow {
                value: value.to_string(),
            })
    }
}

impl TryFrom<f64> for SmaWindow {
    type Error = AnalysisError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= usize::MAX as f64
        {
            Self::new(value as usize)
        } else {
            Err(AnalysisError::InvalidWindow {
                value: value.to_string(),
            })
        }
    }
}

impl FromStr for SmaWindow {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(value) => Self::try_from(value).map_err(|_| AnalysisError::InvalidWindow {
                value: trimmed.to_string(),
            }),
            Err(_) => Err(AnalysisError::InvalidWindow {
                value: trimmed.to_string(),
            }),
        }
    }
}

impl Serialize for SmaWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0.get() as u64)
    }
}

impl<'de> Deserialize<'de> for SmaWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Float(f64),
            Text(String),
        }

        let parsed = match Repr::deserialize(deserializer)? {
            Repr::Int(value) => Self::try_from(value),
            Repr::Float(value) => Self::try_from(value),
            Repr::Text(value) => value.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// A simple moving average aligned with the series it was computed from.
///
/// Positions before the first full window are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedOverlay {
    window: SmaWindow,
    values: Vec<Option<f64>>,
}

impl DerivedOverlay {
    pub fn new(window: SmaWindow, values: Vec<Option<f64>>) -> Self {
        Self { window, values }
    }

    pub fn window(&self) -> SmaWindow {
        self.window
    }

    pub fn name(&self) -> String {
        self.window.label()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent defined average.
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|value| *value)
    }
}
