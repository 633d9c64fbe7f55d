use log::debug;

use crate::algorithm::{SpprcConfig, SpprcSolution, SpprcSolver};
use crate::graph::{ResourceGraph, ResourceNetwork};
use crate::pricing::traits::{PricingColumn, PricingSubproblem};
use crate::resource::ResourceWindow;
use crate::{Error, Result};

/// SPPRC pricing: one master row per resource dimension.
///
/// Under duals `π`, an arc's reduced cost is its base cost minus
/// `Σ π_i · consumption_i`, and a path's column coefficient in row `i` is
/// its accumulated consumption of resource `i`.
#[derive(Debug, Clone)]
pub struct SpprcPricer {
    graph: ResourceGraph<f64>,
    base_costs: Vec<f64>,
    windows: Vec<ResourceWindow<f64>>,
    config: SpprcConfig,
    source: usize,
    sink: usize,
    baseline: Vec<f64>,
}

impl SpprcPricer {
    /// Takes ownership of the graph; its current arc costs become the base costs
    pub fn new(
        graph: ResourceGraph<f64>,
        windows: Vec<ResourceWindow<f64>>,
        config: SpprcConfig,
        source: usize,
        sink: usize,
    ) -> Result<Self> {
        SpprcSolver::new(&graph, &windows, config.clone())?;
        for node in [source, sink] {
            if !graph.has_node(node) {
                return Err(Error::InvalidNode(node));
            }
        }
        let base_costs = graph.arcs().iter().map(|arc| arc.cost).collect();
        let baseline = vec![0.0; windows.len()];
        Ok(SpprcPricer {
            graph,
            base_costs,
            windows,
            config,
            source,
            sink,
            baseline,
        })
    }

    /// Replace the all-zero source baseline
    pub fn with_baseline(mut self, baseline: Vec<f64>) -> Result<Self> {
        if baseline.len() != self.windows.len() {
            return Err(Error::DimensionMismatch {
                context: "baseline",
                expected: self.windows.len(),
                found: baseline.len(),
            });
        }
        self.baseline = baseline;
        Ok(self)
    }

    /// Graph with the reduced costs of the most recent `solve`
    pub fn graph(&self) -> &ResourceGraph<f64> {
        &self.graph
    }

    /// Applies `duals` to the arc costs and runs the label search
    pub fn solve_path(&mut self, duals: &[f64]) -> Result<SpprcSolution<f64>> {
        if duals.len() != self.row_count() {
            return Err(Error::DimensionMismatch {
                context: "duals",
                expected: self.row_count(),
                found: duals.len(),
            });
        }
        for (arc_id, &base) in self.base_costs.iter().enumerate() {
            let arc = self.graph.arc(arc_id).ok_or(Error::InvalidArc(arc_id))?;
            let priced: f64 = arc
                .consumption
                .iter()
                .zip(duals)
                .map(|(used, dual)| used * dual)
                .sum();
            self.graph.set_arc_cost(arc_id, base - priced)?;
        }

        let solver = SpprcSolver::new(&self.graph, &self.windows, self.config.clone())?;
        solver.solve_from(self.source, self.sink, &self.baseline)
    }
}

impl PricingSubproblem for SpprcPricer {
    fn name(&self) -> &'static str {
        "SPPRC"
    }

    fn row_count(&self) -> usize {
        self.windows.len()
    }

    fn solve(&mut self, duals: &[f64]) -> Result<Option<PricingColumn>> {
        let solution = self.solve_path(duals)?;
        let proven_optimal = solution.outcome.is_optimal();
        let Some(path) = solution.outcome.path() else {
            debug!("no feasible column from {} to {}", self.source, self.sink);
            return Ok(None);
        };
        Ok(Some(PricingColumn {
            pattern: path.consumption(&self.graph)?,
            reduced_cost: path.cost,
            proven_optimal,
        }))
    }
}
