use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Cycle restriction applied during extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleRule {
    /// Only resource feasibility limits cycles.
    ///
    /// A cycle with negative cost and zero consumption on every dimension
    /// yields a strictly better label on each lap, so the run never
    /// converges. Reduced costs from a pricing master often produce such
    /// cycles; set `max_insertions` or `max_steps` unless the graph rules
    /// them out.
    #[default]
    Unrestricted,
    /// Paths never revisit a node
    Elementary,
    /// Only the last `k` nodes of a path (including its head) are remembered
    /// and may not be revisited.
    ///
    /// A relaxation, not an exact rule: dominance compares the remembered
    /// nodes as sets, but two labels holding the same set in a different
    /// order forget different nodes on their next extensions. Pruning one of
    /// them may therefore discard paths the survivor cannot reproduce.
    Recent(usize),
}

impl CycleRule {
    /// Whether labels must carry a visited list
    pub fn tracks_visits(&self) -> bool {
        !matches!(self, CycleRule::Unrestricted)
    }

    /// Maximum length of the visited list, `None` for unbounded
    pub fn memory(&self) -> Option<usize> {
        match *self {
            CycleRule::Recent(k) => Some(k),
            _ => None,
        }
    }
}

/// Settings for a label-correcting run.
///
/// The default has no budget. With `CycleRule::Unrestricted` a run only
/// terminates when every negative-cost cycle uses up some additive
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpprcConfig {
    /// Abort once more than this many labels have been inserted
    pub max_insertions: Option<usize>,
    /// Abort once this many nodes have been processed and work remains
    pub max_steps: Option<usize>,
    /// Cycle restriction for extended labels
    pub cycle_rule: CycleRule,
    /// Process nodes once in topological order when the graph is acyclic
    pub dag_sweep: bool,
}

impl SpprcConfig {
    /// Create a configuration with no budget and no cycle restriction
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the insertion budget
    pub fn with_max_insertions(mut self, max: usize) -> Self {
        self.max_insertions = Some(max);
        self
    }

    /// Set the step budget
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = Some(max);
        self
    }

    /// Set the cycle restriction
    pub fn with_cycle_rule(mut self, rule: CycleRule) -> Self {
        self.cycle_rule = rule;
        self
    }

    /// Enable or disable the single topological pass on acyclic graphs
    pub fn with_dag_sweep(mut self, enabled: bool) -> Self {
        self.dag_sweep = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle_rule == CycleRule::Recent(0) {
            return Err(Error::InvalidConfig(
                "recent-visit memory must hold at least one node".to_string(),
            ));
        }
        Ok(())
    }
}
