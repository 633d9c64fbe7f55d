use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{Error, Result};

/// How a resource dimension evolves along a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Pure running sum of arc consumptions (load, count, distance)
    #[default]
    Additive,
    /// Value observed at each node visit; node entry rules may clip or reset it
    /// (time of day, shift clock)
    Calendar,
}

/// Feasibility bound `[min, max]` for one resource dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceWindow<W>
where
    W: Float + Debug,
{
    min: W,
    max: W,
    #[serde(default)]
    kind: ResourceKind,
}

impl<W> ResourceWindow<W>
where
    W: Float + Debug,
{
    /// Creates a window, rejecting `min > max` and NaN bounds.
    ///
    /// `dimension` is only used to label the error.
    pub fn new(dimension: usize, min: W, max: W, kind: ResourceKind) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(Error::InvalidWindow {
                dimension,
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(ResourceWindow { min, max, kind })
    }

    /// Additive window `[min, max]`
    pub fn additive(dimension: usize, min: W, max: W) -> Result<Self> {
        Self::new(dimension, min, max, ResourceKind::Additive)
    }

    /// Calendar window `[min, max]`
    pub fn calendar(dimension: usize, min: W, max: W) -> Result<Self> {
        Self::new(dimension, min, max, ResourceKind::Calendar)
    }

    pub fn min(&self) -> W {
        self.min
    }

    pub fn max(&self) -> W {
        self.max
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns true if `value` lies inside the window
    pub fn contains(&self, value: W) -> bool {
        self.min <= value && value <= self.max
    }

    /// Re-checks the `min <= max` invariant, e.g. after deserialization
    pub(crate) fn validate(&self, dimension: usize) -> Result<()> {
        Self::new(dimension, self.min, self.max, self.kind).map(|_| ())
    }
}

/// True iff every dimension of `resources` lies inside its window.
///
/// A length mismatch is never feasible.
pub fn feasible<W>(resources: &[W], windows: &[ResourceWindow<W>]) -> bool
where
    W: Float + Debug,
{
    resources.len() == windows.len()
        && resources
            .iter()
            .zip(windows)
            .all(|(&value, window)| window.contains(value))
}
