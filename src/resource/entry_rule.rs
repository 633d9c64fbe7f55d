use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Node-entry policy for a calendar resource.
///
/// Applied to the accumulated value when a label enters the node, before the
/// feasibility check. Every rule is monotone non-decreasing in its input, so
/// a label that dominates another still dominates it after the rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryRule<W>
where
    W: Float + Debug,
{
    /// Raise the value to at least the given floor (wait for a window to open)
    Floor(W),
    /// Clamp the value into `[lo, hi]`
    Clamp { lo: W, hi: W },
    /// Overwrite the value (e.g. clock restarts at a depot)
    Reset(W),
}

impl<W> EntryRule<W>
where
    W: Float + Debug,
{
    pub fn apply(&self, value: W) -> W {
        match *self {
            EntryRule::Floor(floor) => value.max(floor),
            EntryRule::Clamp { lo, hi } => value.max(lo).min(hi),
            EntryRule::Reset(reset) => reset,
        }
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        match *self {
            EntryRule::Floor(v) | EntryRule::Reset(v) => v.is_finite(),
            EntryRule::Clamp { lo, hi } => lo.is_finite() && hi.is_finite() && lo <= hi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules() {
        assert_eq!(EntryRule::Floor(6.0).apply(4.0), 6.0);
        assert_eq!(EntryRule::Floor(6.0).apply(9.0), 9.0);
        assert_eq!(EntryRule::Clamp { lo: 1.0, hi: 3.0 }.apply(7.0), 3.0);
        assert_eq!(EntryRule::Clamp { lo: 1.0, hi: 3.0 }.apply(-2.0), 1.0);
        assert_eq!(EntryRule::Reset(0.0).apply(42.0), 0.0);
        assert!(!EntryRule::Clamp { lo: 3.0, hi: 1.0 }.is_well_formed());
    }
}
