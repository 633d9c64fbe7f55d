use num_traits::Float;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Stable handle of a label: the node whose store owns it and its slot in
/// that store's arena. Slots are never reused during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId {
    pub node: usize,
    pub slot: usize,
}

/// A partial path ending at `node`.
///
/// Labels are immutable; extension always builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Label<W>
where
    W: Float + Debug,
{
    node: usize,
    cost: W,
    resources: Vec<W>,
    predecessor: Option<LabelId>,
    via_arc: Option<usize>,
    visited: Option<Vec<usize>>,
}

impl<W> Label<W>
where
    W: Float + Debug,
{
    /// Root label at the source: no predecessor, zero cost
    pub fn root(node: usize, baseline: Vec<W>, track_visited: bool) -> Self {
        Label {
            node,
            cost: W::zero(),
            resources: baseline,
            predecessor: None,
            via_arc: None,
            visited: track_visited.then(|| vec![node]),
        }
    }

    /// Detached label with no predecessor
    pub fn new(node: usize, cost: W, resources: Vec<W>, visited: Option<Vec<usize>>) -> Self {
        Label {
            node,
            cost,
            resources,
            predecessor: None,
            via_arc: None,
            visited,
        }
    }

    pub(crate) fn extended(
        node: usize,
        cost: W,
        resources: Vec<W>,
        predecessor: LabelId,
        via_arc: usize,
        visited: Option<Vec<usize>>,
    ) -> Self {
        Label {
            node,
            cost,
            resources,
            predecessor: Some(predecessor),
            via_arc: Some(via_arc),
            visited,
        }
    }

    /// Label with arbitrary links, for building corrupt chains in tests
    #[cfg(test)]
    pub(crate) fn with_links(
        node: usize,
        cost: W,
        resources: Vec<W>,
        predecessor: Option<LabelId>,
        via_arc: Option<usize>,
    ) -> Self {
        Label {
            node,
            cost,
            resources,
            predecessor,
            via_arc,
            visited: None,
        }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    pub fn cost(&self) -> W {
        self.cost
    }

    pub fn resources(&self) -> &[W] {
        &self.resources
    }

    pub fn predecessor(&self) -> Option<LabelId> {
        self.predecessor
    }

    /// Arc traversed to reach this label, `None` for the root
    pub fn via_arc(&self) -> Option<usize> {
        self.via_arc
    }

    /// Remembered visited nodes, oldest first, when cycle tracking is on
    pub fn visited(&self) -> Option<&[usize]> {
        self.visited.as_deref()
    }

    /// Dominance: `self` is no worse than `other` in cost and every resource
    /// dimension, and (when both track visits) has visited a subset of the
    /// nodes `other` has visited. Reflexive and transitive.
    pub fn dominates(&self, other: &Label<W>) -> bool {
        if self.cost > other.cost || self.resources.len() != other.resources.len() {
            return false;
        }
        if self
            .resources
            .iter()
            .zip(&other.resources)
            .any(|(mine, theirs)| mine > theirs)
        {
            return false;
        }
        match (&self.visited, &other.visited) {
            (Some(mine), Some(theirs)) => mine.iter().all(|node| theirs.contains(node)),
            _ => true,
        }
    }

    /// Tie-break order for picking the best label: lowest cost, then the
    /// lexicographically smallest resource vector.
    pub fn rank_cmp(&self, other: &Label<W>) -> Ordering {
        OrderedFloat(self.cost)
            .cmp(&OrderedFloat(other.cost))
            .then_with(|| {
                let mine = self.resources.iter().map(|&r| OrderedFloat(r));
                let theirs = other.resources.iter().map(|&r| OrderedFloat(r));
                mine.cmp(theirs)
            })
    }
}
