use log::error;
use num_traits::Float;
use serde::Serialize;
use std::fmt::Debug;

use crate::algorithm::extension::advance_resources;
use crate::data_structures::{LabelId, LabelStore};
use crate::graph::ResourceNetwork;
use crate::resource::ResourceWindow;
use crate::{Error, Result};

/// State of a path after reaching one of its nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep<W> {
    pub node: usize,
    pub cost: W,
    pub resources: Vec<W>,
}

/// A source-to-sink path recovered from a label chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePath<W> {
    /// Nodes from source to sink
    pub nodes: Vec<usize>,
    /// Arc ids traversed, one fewer than `nodes`
    pub arcs: Vec<usize>,
    /// Cumulative cost and resources at every node
    pub steps: Vec<PathStep<W>>,
    /// Total cost
    pub cost: W,
    /// Resource vector at the sink
    pub resources: Vec<W>,
}

impl<W> ResourcePath<W>
where
    W: Float + Debug,
{
    /// Sum of raw arc consumption per dimension (ignores entry rules).
    ///
    /// These are the column coefficients handed to a master problem.
    pub fn consumption<G>(&self, graph: &G) -> Result<Vec<W>>
    where
        G: ResourceNetwork<W>,
    {
        let mut totals = vec![W::zero(); graph.resource_count()];
        for &arc_id in &self.arcs {
            let arc = graph.arc(arc_id).ok_or(Error::InvalidArc(arc_id))?;
            for (total, &used) in totals.iter_mut().zip(&arc.consumption) {
                *total = *total + used;
            }
        }
        Ok(totals)
    }
}

/// Walks predecessor links from `sink_label` back to the root label and
/// returns the path in source-to-sink order.
///
/// A link that leaves the stores, or a chain longer than every label ever
/// created, means the run is corrupt and is reported as an invariant
/// violation.
pub fn reconstruct<W>(stores: &[LabelStore<W>], sink_label: LabelId) -> Result<ResourcePath<W>>
where
    W: Float + Debug,
{
    let limit: usize = stores.iter().map(|store| store.arena_len()).sum();
    let mut steps = Vec::new();
    let mut arcs = Vec::new();
    let mut cursor = Some(sink_label);

    while let Some(id) = cursor {
        let label = stores
            .get(id.node)
            .and_then(|store| store.get(id.slot))
            .ok_or_else(|| violation(format!("predecessor {:?} is outside the label stores", id)))?;
        if label.node() != id.node {
            return Err(violation(format!(
                "label {:?} claims node {}",
                id,
                label.node()
            )));
        }
        if steps.len() >= limit {
            return Err(violation(format!(
                "predecessor chain from {:?} does not terminate",
                sink_label
            )));
        }

        steps.push(PathStep {
            node: label.node(),
            cost: label.cost(),
            resources: label.resources().to_vec(),
        });
        match (label.predecessor(), label.via_arc()) {
            (Some(_), Some(arc)) => arcs.push(arc),
            (None, None) => {}
            _ => {
                return Err(violation(format!(
                    "label {:?} has a predecessor without an arc",
                    id
                )))
            }
        }
        cursor = label.predecessor();
    }

    steps.reverse();
    arcs.reverse();
    let last = steps
        .last()
        .ok_or_else(|| violation("empty predecessor chain".to_string()))?;
    let cost = last.cost;
    let resources = last.resources.clone();

    Ok(ResourcePath {
        nodes: steps.iter().map(|step| step.node).collect(),
        arcs,
        steps,
        cost,
        resources,
    })
}

/// Recomputes total cost and final resources by replaying `arcs` from
/// `baseline`, using the same arithmetic as label extension.
pub fn replay_path<W, G>(
    graph: &G,
    windows: &[ResourceWindow<W>],
    baseline: &[W],
    arcs: &[usize],
) -> Result<(W, Vec<W>)>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    if baseline.len() != windows.len() {
        return Err(Error::DimensionMismatch {
            context: "baseline",
            expected: windows.len(),
            found: baseline.len(),
        });
    }

    let mut cost = W::zero();
    let mut resources = baseline.to_vec();
    let mut at: Option<usize> = None;
    for &arc_id in arcs {
        let arc = graph.arc(arc_id).ok_or(Error::InvalidArc(arc_id))?;
        if at.map_or(false, |node| node != arc.from) {
            return Err(Error::InvalidArc(arc_id));
        }
        cost = cost + arc.cost;
        resources = advance_resources(graph, windows, &resources, arc);
        at = Some(arc.to);
    }
    Ok((cost, resources))
}

fn violation(message: String) -> Error {
    error!("label chain corrupt: {}", message);
    Error::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::Label;
    use crate::graph::ResourceGraph;

    fn windows() -> Vec<ResourceWindow<f64>> {
        vec![ResourceWindow::additive(0, 0.0, 10.0).unwrap()]
    }

    fn stores(n: usize) -> Vec<LabelStore<f64>> {
        (0..n).map(LabelStore::new).collect()
    }

    fn link(node: usize, cost: f64, used: f64, predecessor: LabelId, arc: usize) -> Label<f64> {
        Label::extended(node, cost, vec![used], predecessor, arc, None)
    }

    #[test]
    fn test_reconstruct_walks_back_to_root() {
        let mut stores = stores(3);
        let root = stores[0].insert_unchecked(Label::root(0, vec![0.0], false));
        let mid = stores[1].insert_unchecked(link(1, 2.0, 1.0, root, 4));
        let end = stores[2].insert_unchecked(link(2, 5.0, 3.0, mid, 7));

        let path = reconstruct(&stores, end).unwrap();
        assert_eq!(path.nodes, vec![0, 1, 2]);
        assert_eq!(path.arcs, vec![4, 7]);
        assert_eq!(path.cost, 5.0);
        assert_eq!(path.resources, vec![3.0]);
        assert_eq!(path.steps[1].cost, 2.0);
    }

    #[test]
    fn test_predecessor_outside_stores() {
        let mut stores = stores(2);
        let lost = LabelId { node: 5, slot: 0 };
        let id = stores[1].insert_unchecked(link(1, 1.0, 1.0, lost, 0));
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));

        // Right store, missing slot
        let missing = LabelId { node: 0, slot: 3 };
        let id = stores[1].insert_unchecked(link(1, 1.0, 2.0, missing, 0));
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_label_filed_under_wrong_node() {
        let mut stores = stores(2);
        let id = stores[1].insert_unchecked(Label::root(0, vec![0.0], false));
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_predecessor_without_arc() {
        let mut stores = stores(2);
        let root = stores[0].insert_unchecked(Label::root(0, vec![0.0], false));
        let orphan = Label::with_links(1, 1.0, vec![1.0], Some(root), None);
        let id = stores[1].insert_unchecked(orphan);
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));

        let dangling = Label::with_links(1, 1.0, vec![2.0], None, Some(0));
        let id = stores[1].insert_unchecked(dangling);
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_cyclic_chain_does_not_terminate() {
        let mut stores = stores(2);
        let a = LabelId { node: 0, slot: 0 };
        let b = LabelId { node: 1, slot: 0 };
        stores[0].insert_unchecked(link(0, 1.0, 1.0, b, 1));
        stores[1].insert_unchecked(link(1, 1.0, 1.0, a, 0));
        assert!(matches!(reconstruct(&stores, a), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_label_that_is_its_own_predecessor() {
        let mut stores = stores(1);
        let id = LabelId { node: 0, slot: 0 };
        stores[0].insert_unchecked(link(0, 1.0, 1.0, id, 0));
        assert!(matches!(reconstruct(&stores, id), Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_replay_rejects_disconnected_arcs() {
        let mut graph = ResourceGraph::with_nodes(4, 1);
        graph.add_arc(0, 1, 1.0, vec![1.0]).unwrap();
        graph.add_arc(2, 3, 1.0, vec![1.0]).unwrap();
        let windows = windows();

        let (cost, resources) = replay_path(&graph, &windows, &[0.0], &[0]).unwrap();
        assert_eq!((cost, resources), (1.0, vec![1.0]));
        assert_eq!(
            replay_path(&graph, &windows, &[0.0], &[0, 1]),
            Err(Error::InvalidArc(1))
        );
        assert_eq!(replay_path(&graph, &windows, &[0.0], &[9]), Err(Error::InvalidArc(9)));
    }
}
