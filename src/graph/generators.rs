use rand::prelude::*;

use crate::graph::{ResourceGraph, ResourceNetwork};
use crate::resource::{EntryRule, ResourceWindow};
use crate::{Error, Result};

/// A generated instance: graph, windows, source and sink
#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    pub graph: ResourceGraph<f64>,
    pub windows: Vec<ResourceWindow<f64>>,
    pub source: usize,
    pub sink: usize,
}

/// Generates a layered DAG: `layers` layers of `width` nodes between a
/// source (node 0) and a sink (last node). Every node connects to each node
/// of the next layer with probability `density`; costs may be negative.
///
/// Additive windows are `[0, capacity]` on every dimension.
pub fn generate_layered_dag<R: Rng>(
    rng: &mut R,
    layers: usize,
    width: usize,
    resources: usize,
    density: f64,
    capacity: f64,
) -> Result<GeneratedInstance> {
    assert!(layers > 0 && width > 0, "layers and width must be positive");

    let mut graph = ResourceGraph::with_nodes(layers * width + 2, resources);
    let source = 0;
    let sink = layers * width + 1;
    let node = |layer: usize, slot: usize| 1 + layer * width + slot;

    for slot in 0..width {
        graph.add_arc(source, node(0, slot), random_cost(rng), random_consumption(rng, resources))?;
        graph.add_arc(
            node(layers - 1, slot),
            sink,
            random_cost(rng),
            random_consumption(rng, resources),
        )?;
    }
    for layer in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                if rng.gen_bool(density) {
                    graph.add_arc(
                        node(layer, a),
                        node(layer + 1, b),
                        random_cost(rng),
                        random_consumption(rng, resources),
                    )?;
                }
            }
        }
    }

    Ok(GeneratedInstance {
        graph,
        windows: additive_windows(resources, capacity)?,
        source,
        sink,
    })
}

/// Generates a general digraph on `nodes` nodes (cycles allowed) where each
/// ordered pair is connected with probability `density`. Costs are drawn
/// from `[-5, 10)`, consumption from `[0, 5)`.
pub fn generate_random_digraph<R: Rng>(
    rng: &mut R,
    nodes: usize,
    resources: usize,
    density: f64,
    capacity: f64,
) -> Result<GeneratedInstance> {
    assert!(nodes >= 2, "need at least a source and a sink");

    let mut graph = ResourceGraph::with_nodes(nodes, resources);
    for u in 0..nodes {
        for v in 0..nodes {
            if u != v && rng.gen_bool(density) {
                graph.add_arc(u, v, random_cost(rng), random_consumption(rng, resources))?;
            }
        }
    }

    Ok(GeneratedInstance {
        graph,
        windows: additive_windows(resources, capacity)?,
        source: 0,
        sink: nodes - 1,
    })
}

/// Turns `dimension` of a generated instance into a calendar resource and
/// gives each node other than the source an entry rule on it with
/// probability `density`. Rules are drawn evenly from `Floor`, `Clamp` and
/// `Reset` with integral bounds inside the dimension's window.
pub fn add_calendar_rules<R: Rng>(
    rng: &mut R,
    instance: &mut GeneratedInstance,
    dimension: usize,
    density: f64,
) -> Result<()> {
    let window = *instance
        .windows
        .get(dimension)
        .ok_or(Error::DimensionMismatch {
            context: "calendar dimension",
            expected: instance.windows.len(),
            found: dimension + 1,
        })?;
    instance.windows[dimension] =
        ResourceWindow::calendar(dimension, window.min(), window.max())?;

    // Integral bounds keep every sum exact
    let top = window.max().floor().max(0.0) as i64;
    for node in 0..instance.graph.node_count() {
        if node == instance.source || !rng.gen_bool(density) {
            continue;
        }
        let a = rng.gen_range(0..=top) as f64;
        let b = rng.gen_range(0..=top) as f64;
        let rule = match rng.gen_range(0..3) {
            0 => EntryRule::Floor(a),
            1 => EntryRule::Clamp {
                lo: a.min(b),
                hi: a.max(b),
            },
            _ => EntryRule::Reset(a),
        };
        instance.graph.set_entry_rule(node, dimension, rule)?;
    }
    Ok(())
}

fn additive_windows(resources: usize, capacity: f64) -> Result<Vec<ResourceWindow<f64>>> {
    (0..resources)
        .map(|dimension| ResourceWindow::additive(dimension, 0.0, capacity))
        .collect()
}

fn random_cost<R: Rng>(rng: &mut R) -> f64 {
    // Integral values keep sums exact, so replayed paths compare bit for bit
    rng.gen_range(-5..10) as f64
}

fn random_consumption<R: Rng>(rng: &mut R, resources: usize) -> Vec<f64> {
    (0..resources).map(|_| rng.gen_range(0..5) as f64).collect()
}
