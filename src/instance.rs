//! JSON problem instances: the graph, windows and query of one SPPRC run
//! as plain data.

use serde::{Deserialize, Serialize};

use crate::algorithm::{SpprcConfig, SpprcSolution, SpprcSolver};
use crate::graph::ResourceGraph;
use crate::resource::{EntryRule, ResourceWindow};
use crate::{Error, Result};

/// One arc of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
    pub consumption: Vec<f64>,
}

/// A calendar entry rule attached to a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRuleSpec {
    pub node: usize,
    pub dimension: usize,
    pub rule: EntryRule<f64>,
}

/// A complete SPPRC query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub nodes: usize,
    pub windows: Vec<ResourceWindow<f64>>,
    pub arcs: Vec<ArcSpec>,
    #[serde(default)]
    pub entry_rules: Vec<EntryRuleSpec>,
    pub source: usize,
    pub sink: usize,
    /// Resources of the source label; all zeros when absent
    #[serde(default)]
    pub baseline: Option<Vec<f64>>,
    #[serde(default)]
    pub config: SpprcConfig,
}

impl ProblemInstance {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInstance(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidInstance(e.to_string()))
    }

    /// Builds the graph, validating every arc and entry rule
    pub fn build_graph(&self) -> Result<ResourceGraph<f64>> {
        let mut graph = ResourceGraph::with_nodes(self.nodes, self.windows.len());
        for arc in &self.arcs {
            graph.add_arc(arc.from, arc.to, arc.cost, arc.consumption.clone())?;
        }
        for entry in &self.entry_rules {
            graph.set_entry_rule(entry.node, entry.dimension, entry.rule)?;
        }
        Ok(graph)
    }

    /// Builds the graph and answers the instance's query
    pub fn solve(&self) -> Result<SpprcSolution<f64>> {
        let graph = self.build_graph()?;
        let solver = SpprcSolver::new(&graph, &self.windows, self.config.clone())?;
        match &self.baseline {
            Some(baseline) => solver.solve_from(self.source, self.sink, baseline),
            None => solver.solve(self.source, self.sink),
        }
    }
}
