use num_traits::Float;
use std::collections::VecDeque;
use std::fmt::Debug;

use crate::resource::EntryRule;

/// An arc carrying a cost and one consumption value per resource dimension
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceArc<W>
where
    W: Float + Debug,
{
    pub from: usize,
    pub to: usize,
    pub cost: W,
    pub consumption: Vec<W>,
}

/// Trait representing a directed graph whose arcs consume resources
pub trait ResourceNetwork<W>: Debug
where
    W: Float + Debug,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of arcs in the graph
    fn arc_count(&self) -> usize;

    /// Number of resource dimensions every arc carries
    fn resource_count(&self) -> usize;

    /// Looks up an arc by id
    fn arc(&self, arc: usize) -> Option<&ResourceArc<W>>;

    /// Returns an iterator over `(arc id, arc)` leaving `node`
    fn outgoing_arcs(&self, node: usize) -> Box<dyn Iterator<Item = (usize, &ResourceArc<W>)> + '_>;

    /// Entry rule applied to `dimension` when a label enters `node`
    fn entry_rule(&self, node: usize, dimension: usize) -> Option<EntryRule<W>>;

    /// Returns an iterator over every `(node, dimension, rule)` triple
    fn entry_rules(&self) -> Box<dyn Iterator<Item = (usize, usize, EntryRule<W>)> + '_>;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Kahn's algorithm; `None` if the graph has a cycle
    fn topological_order(&self) -> Option<Vec<usize>> {
        let n = self.node_count();
        let mut in_degree = vec![0usize; n];
        for u in 0..n {
            for (_, arc) in self.outgoing_arcs(u) {
                in_degree[arc.to] += 1;
            }
        }
        let mut ready: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(u) = ready.pop_front() {
            order.push(u);
            for (_, arc) in self.outgoing_arcs(u) {
                in_degree[arc.to] -= 1;
                if in_degree[arc.to] == 0 {
                    ready.push_back(arc.to);
                }
            }
        }
        (order.len() == n).then_some(order)
    }

    /// Returns true if the graph contains a directed cycle
    fn has_cycle(&self) -> bool {
        self.topological_order().is_none()
    }
}
