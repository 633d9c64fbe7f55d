use serde::{Deserialize, Serialize};

/// A candidate column produced by a pricing subproblem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingColumn {
    /// Coefficient of the column in each master row
    pub pattern: Vec<f64>,

    /// Reduced cost under the duals it was priced with; negative columns
    /// improve a minimization master
    pub reduced_cost: f64,

    /// False when the subproblem stopped early and a better column may exist
    pub proven_optimal: bool,
}

impl PricingColumn {
    /// True if the column should enter a minimization master
    pub fn improves(&self, tolerance: f64) -> bool {
        self.reduced_cost < -tolerance
    }
}

/// Capability interface for pricing subproblems.
///
/// A column-generation loop owns one implementation per subproblem type and
/// calls `solve` with the current duals of the master rows.
pub trait PricingSubproblem {
    /// Get the name of the subproblem
    fn name(&self) -> &'static str;

    /// Number of master rows (length of `duals` and of every pattern)
    fn row_count(&self) -> usize;

    /// Best column under `duals`, or `None` if the subproblem has no
    /// feasible column at all
    fn solve(&mut self, duals: &[f64]) -> crate::Result<Option<PricingColumn>>;
}
