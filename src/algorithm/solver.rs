use log::{debug, info};
use num_traits::Float;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Debug;

use crate::algorithm::config::SpprcConfig;
use crate::algorithm::label_search::{LabelSearch, SearchStats, SearchStatus};
use crate::algorithm::path::ResourcePath;
use crate::graph::ResourceNetwork;
use crate::resource::{ResourceKind, ResourceWindow};
use crate::{Error, Result};

/// Answer to one source/sink query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SpprcOutcome<W> {
    /// Minimum-cost feasible path
    Optimal { path: ResourcePath<W> },
    /// The search converged without a feasible label at the sink
    Infeasible,
    /// The search was truncated; the true answer is unknown. `incumbent` is
    /// the best sink path found before stopping, if any.
    BudgetExceeded { incumbent: Option<ResourcePath<W>> },
}

impl<W> SpprcOutcome<W> {
    /// Optimal path or budget-limited incumbent
    pub fn path(&self) -> Option<&ResourcePath<W>> {
        match self {
            SpprcOutcome::Optimal { path } => Some(path),
            SpprcOutcome::BudgetExceeded { incumbent } => incumbent.as_ref(),
            SpprcOutcome::Infeasible => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SpprcOutcome::Optimal { .. })
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SpprcOutcome::Infeasible)
    }

    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, SpprcOutcome::BudgetExceeded { .. })
    }
}

/// Outcome together with the run's counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpprcSolution<W> {
    pub outcome: SpprcOutcome<W>,
    pub stats: SearchStats,
}

/// Label-correcting SPPRC solver bound to a read-only graph and its windows.
///
/// All configuration errors are raised by [`SpprcSolver::new`]; each query
/// then runs on fresh per-run state, so one solver can serve many queries,
/// including concurrent ones through [`SpprcSolver::solve_batch`].
#[derive(Debug, Clone)]
pub struct SpprcSolver<'a, W, G>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    graph: &'a G,
    windows: &'a [ResourceWindow<W>],
    config: SpprcConfig,
}

impl<'a, W, G> SpprcSolver<'a, W, G>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    /// Validates the graph against the windows and the configuration
    pub fn new(
        graph: &'a G,
        windows: &'a [ResourceWindow<W>],
        config: SpprcConfig,
    ) -> Result<Self> {
        validate(graph, windows, &config)?;
        Ok(SpprcSolver {
            graph,
            windows,
            config,
        })
    }

    pub fn config(&self) -> &SpprcConfig {
        &self.config
    }

    pub fn windows(&self) -> &[ResourceWindow<W>] {
        self.windows
    }

    /// Starts a run from `source` without stepping it
    pub fn search(&self, source: usize, baseline: &[W]) -> Result<LabelSearch<'a, W, G>> {
        LabelSearch::new(
            self.graph,
            self.windows,
            self.config.clone(),
            source,
            baseline.to_vec(),
        )
    }

    /// Best path from `source` to `sink` starting with all resources at zero
    pub fn solve(&self, source: usize, sink: usize) -> Result<SpprcSolution<W>> {
        let baseline = vec![W::zero(); self.windows.len()];
        self.solve_from(source, sink, &baseline)
    }

    /// Best path from `source` to `sink` starting at `baseline`
    pub fn solve_from(
        &self,
        source: usize,
        sink: usize,
        baseline: &[W],
    ) -> Result<SpprcSolution<W>> {
        if !self.graph.has_node(sink) {
            return Err(Error::InvalidNode(sink));
        }
        let mut search = self.search(source, baseline)?;
        let status = search.run()?;

        let best = search.best_path(sink)?;
        let outcome = match (status, best) {
            (SearchStatus::Converged, Some(path)) => SpprcOutcome::Optimal { path },
            (SearchStatus::Converged, None) => SpprcOutcome::Infeasible,
            (SearchStatus::BudgetExceeded, incumbent) => SpprcOutcome::BudgetExceeded { incumbent },
            (SearchStatus::Running, _) => {
                return Err(Error::InvariantViolation(
                    "label search stopped while still running".to_string(),
                ))
            }
        };
        match outcome.path() {
            Some(path) => info!(
                "{} -> {}: cost {:?} over {} arcs ({:?})",
                source,
                sink,
                path.cost,
                path.arcs.len(),
                status
            ),
            None => info!("{} -> {}: no feasible path ({:?})", source, sink, status),
        }

        Ok(SpprcSolution {
            outcome,
            stats: search.stats().clone(),
        })
    }

    /// Answers independent `(source, sink)` queries in parallel, each with
    /// its own label stores. Results keep the query order.
    pub fn solve_batch(&self, queries: &[(usize, usize)]) -> Vec<Result<SpprcSolution<W>>>
    where
        W: Send + Sync,
        G: Sync,
    {
        debug!("solving {} queries in parallel", queries.len());
        queries
            .par_iter()
            .map(|&(source, sink)| self.solve(source, sink))
            .collect()
    }
}

/// Configuration checks shared by every run
fn validate<W, G>(graph: &G, windows: &[ResourceWindow<W>], config: &SpprcConfig) -> Result<()>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    config.validate()?;
    if windows.len() != graph.resource_count() {
        return Err(Error::DimensionMismatch {
            context: "resource windows",
            expected: graph.resource_count(),
            found: windows.len(),
        });
    }
    for (dimension, window) in windows.iter().enumerate() {
        window.validate(dimension)?;
    }
    for (node, dimension, _) in graph.entry_rules() {
        match windows.get(dimension).map(|window| window.kind()) {
            Some(ResourceKind::Calendar) => {}
            Some(ResourceKind::Additive) => {
                return Err(Error::EntryRuleOnAdditive { node, dimension })
            }
            None => {
                return Err(Error::DimensionMismatch {
                    context: "entry rule dimension",
                    expected: windows.len(),
                    found: dimension + 1,
                })
            }
        }
    }
    Ok(())
}
