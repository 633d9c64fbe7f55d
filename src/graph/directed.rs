use num_traits::Float;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::graph::traits::{ResourceArc, ResourceNetwork};
use crate::resource::EntryRule;
use crate::{Error, Result};

/// A resource-constrained directed graph using adjacency lists.
///
/// Parallel arcs are allowed; paths are reported by arc id, so they stay
/// unambiguous in a multigraph.
#[derive(Debug, Clone)]
pub struct ResourceGraph<W>
where
    W: Float + Debug,
{
    /// Number of resource dimensions every arc must carry
    resource_count: usize,

    /// All arcs, indexed by arc id
    arcs: Vec<ResourceArc<W>>,

    /// Outgoing arc ids for each node
    outgoing: Vec<Vec<usize>>,

    /// Calendar entry rules keyed by (node, dimension)
    entry_rules: HashMap<(usize, usize), EntryRule<W>>,
}

impl<W> ResourceGraph<W>
where
    W: Float + Debug,
{
    /// Creates an empty graph whose arcs carry `resource_count` dimensions
    pub fn new(resource_count: usize) -> Self {
        Self::with_nodes(0, resource_count)
    }

    /// Creates a graph with `nodes` isolated nodes
    pub fn with_nodes(nodes: usize, resource_count: usize) -> Self {
        ResourceGraph {
            resource_count,
            arcs: Vec::new(),
            outgoing: vec![Vec::new(); nodes],
            entry_rules: HashMap::new(),
        }
    }

    /// Adds a node and returns its ID
    pub fn add_node(&mut self) -> usize {
        self.outgoing.push(Vec::new());
        self.outgoing.len() - 1
    }

    /// Adds an arc and returns its ID.
    ///
    /// Consumption must have one finite, non-negative entry per resource
    /// dimension, and the cost must be finite (it may be negative).
    pub fn add_arc(
        &mut self,
        from: usize,
        to: usize,
        cost: W,
        consumption: Vec<W>,
    ) -> Result<usize> {
        for node in [from, to] {
            if !self.has_node(node) {
                return Err(Error::InvalidNode(node));
            }
        }
        if consumption.len() != self.resource_count {
            return Err(Error::DimensionMismatch {
                context: "arc consumption",
                expected: self.resource_count,
                found: consumption.len(),
            });
        }
        if let Some((dimension, &value)) = consumption
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || **value < W::zero())
        {
            return Err(Error::InvalidConsumption {
                dimension,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        check_cost(cost)?;

        let id = self.arcs.len();
        self.arcs.push(ResourceArc {
            from,
            to,
            cost,
            consumption,
        });
        self.outgoing[from].push(id);
        Ok(id)
    }

    /// Replaces an arc's cost, e.g. with a reduced cost from current duals
    pub fn set_arc_cost(&mut self, arc: usize, cost: W) -> Result<()> {
        check_cost(cost)?;
        let slot = self.arcs.get_mut(arc).ok_or(Error::InvalidArc(arc))?;
        slot.cost = cost;
        Ok(())
    }

    /// Installs the entry rule for `dimension` at `node`, replacing any previous one
    pub fn set_entry_rule(
        &mut self,
        node: usize,
        dimension: usize,
        rule: EntryRule<W>,
    ) -> Result<()> {
        if !self.has_node(node) {
            return Err(Error::InvalidNode(node));
        }
        if dimension >= self.resource_count {
            return Err(Error::DimensionMismatch {
                context: "entry rule dimension",
                expected: self.resource_count,
                found: dimension + 1,
            });
        }
        if !rule.is_well_formed() {
            return Err(Error::InvalidConfig(format!(
                "malformed entry rule {:?} at node {} dimension {}",
                rule, node, dimension
            )));
        }
        self.entry_rules.insert((node, dimension), rule);
        Ok(())
    }

    /// All arcs in id order
    pub fn arcs(&self) -> &[ResourceArc<W>] {
        &self.arcs
    }
}

fn check_cost<W: Float>(cost: W) -> Result<()> {
    if cost.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidCost(cost.to_f64().unwrap_or(f64::NAN)))
    }
}

impl<W> ResourceNetwork<W> for ResourceGraph<W>
where
    W: Float + Debug,
{
    fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    fn resource_count(&self) -> usize {
        self.resource_count
    }

    fn arc(&self, arc: usize) -> Option<&ResourceArc<W>> {
        self.arcs.get(arc)
    }

    fn outgoing_arcs(
        &self,
        node: usize,
    ) -> Box<dyn Iterator<Item = (usize, &ResourceArc<W>)> + '_> {
        match self.outgoing.get(node) {
            Some(ids) => Box::new(ids.iter().map(move |&id| (id, &self.arcs[id]))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn entry_rule(&self, node: usize, dimension: usize) -> Option<EntryRule<W>> {
        self.entry_rules.get(&(node, dimension)).copied()
    }

    fn entry_rules(&self) -> Box<dyn Iterator<Item = (usize, usize, EntryRule<W>)> + '_> {
        Box::new(
            self.entry_rules
                .iter()
                .map(|(&(node, dimension), &rule)| (node, dimension, rule)),
        )
    }
}
