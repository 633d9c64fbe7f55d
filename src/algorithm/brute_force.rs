use num_traits::Float;
use ordered_float::OrderedFloat;
use std::fmt::Debug;

use crate::algorithm::extension::advance_resources;
use crate::algorithm::path::{PathStep, ResourcePath};
use crate::graph::ResourceNetwork;
use crate::resource::{feasible, ResourceWindow};
use crate::{Error, Result};

/// Exhaustive reference solver: depth-first enumeration of every elementary
/// path whose prefixes all stay inside the windows.
///
/// Exponential; meant for checking the label search on small graphs.
#[derive(Debug, Default)]
pub struct BruteForce;

impl BruteForce {
    /// Creates a new brute-force solver instance
    pub fn new() -> Self {
        BruteForce
    }

    pub fn name(&self) -> &'static str {
        "BruteForce"
    }

    /// Every feasible elementary path from `source` to `sink`
    pub fn enumerate<W, G>(
        &self,
        graph: &G,
        windows: &[ResourceWindow<W>],
        source: usize,
        sink: usize,
        baseline: &[W],
    ) -> Result<Vec<ResourcePath<W>>>
    where
        W: Float + Debug,
        G: ResourceNetwork<W>,
    {
        for node in [source, sink] {
            if !graph.has_node(node) {
                return Err(Error::InvalidNode(node));
            }
        }
        if baseline.len() != windows.len() {
            return Err(Error::DimensionMismatch {
                context: "baseline",
                expected: windows.len(),
                found: baseline.len(),
            });
        }

        let mut found = Vec::new();
        if !feasible(baseline, windows) {
            return Ok(found);
        }
        let mut on_path = vec![false; graph.node_count()];
        on_path[source] = true;
        let mut walk = Walk {
            steps: vec![PathStep {
                node: source,
                cost: W::zero(),
                resources: baseline.to_vec(),
            }],
            arcs: Vec::new(),
        };
        dfs(graph, windows, sink, &mut on_path, &mut walk, &mut found);
        Ok(found)
    }

    /// Cheapest feasible elementary path, ties broken like the label search
    pub fn best<W, G>(
        &self,
        graph: &G,
        windows: &[ResourceWindow<W>],
        source: usize,
        sink: usize,
        baseline: &[W],
    ) -> Result<Option<ResourcePath<W>>>
    where
        W: Float + Debug,
        G: ResourceNetwork<W>,
    {
        let paths = self.enumerate(graph, windows, source, sink, baseline)?;
        Ok(paths.into_iter().min_by(|a, b| {
            OrderedFloat(a.cost)
                .cmp(&OrderedFloat(b.cost))
                .then_with(|| {
                    let left = a.resources.iter().map(|&r| OrderedFloat(r));
                    let right = b.resources.iter().map(|&r| OrderedFloat(r));
                    left.cmp(right)
                })
        }))
    }
}

struct Walk<W> {
    steps: Vec<PathStep<W>>,
    arcs: Vec<usize>,
}

fn dfs<W, G>(
    graph: &G,
    windows: &[ResourceWindow<W>],
    sink: usize,
    on_path: &mut [bool],
    walk: &mut Walk<W>,
    found: &mut Vec<ResourcePath<W>>,
) where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    let Some(head) = walk.steps.last() else {
        return;
    };
    if head.node == sink {
        found.push(ResourcePath {
            nodes: walk.steps.iter().map(|step| step.node).collect(),
            arcs: walk.arcs.clone(),
            steps: walk.steps.clone(),
            cost: head.cost,
            resources: head.resources.clone(),
        });
        // An elementary path cannot leave the sink and come back
        return;
    }

    let (node, cost, resources) = (head.node, head.cost, head.resources.clone());
    for (arc_id, arc) in graph.outgoing_arcs(node) {
        if on_path[arc.to] {
            continue;
        }
        let next = advance_resources(graph, windows, &resources, arc);
        if !feasible(&next, windows) {
            continue;
        }
        on_path[arc.to] = true;
        walk.steps.push(PathStep {
            node: arc.to,
            cost: cost + arc.cost,
            resources: next,
        });
        walk.arcs.push(arc_id);
        dfs(graph, windows, sink, on_path, walk, found);
        walk.arcs.pop();
        walk.steps.pop();
        on_path[arc.to] = false;
    }
}
