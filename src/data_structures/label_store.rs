use num_traits::Float;
use std::fmt::Debug;

use crate::data_structures::label::{Label, LabelId};
use crate::resource::{feasible, ResourceWindow};
use crate::{Error, Result};

/// What happened to a candidate handed to [`LabelStore::try_insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored under `id`; `removed` survivors were dominated by it
    Inserted { id: LabelId, removed: usize },
    /// Outside the resource windows
    Infeasible,
    /// An existing survivor dominates it (including an exact duplicate)
    Dominated,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted { .. })
    }
}

/// Labels owned by a single node.
///
/// The store is an arena: every label ever inserted keeps its slot until the
/// store is dropped, so predecessor links stay valid after pruning. Removal
/// clears the slot's `alive` flag and drops it from `live`, so dominance
/// checks only ever visit surviving labels. The surviving labels are pairwise
/// non-dominating after every call to `try_insert`.
#[derive(Debug, Clone)]
pub struct LabelStore<W>
where
    W: Float + Debug,
{
    node: usize,
    labels: Vec<Label<W>>,
    alive: Vec<bool>,
    /// Surviving slots in ascending order
    live: Vec<usize>,
    /// Slots below this index have already been handed out for extension
    cursor: usize,
}

impl<W> LabelStore<W>
where
    W: Float + Debug,
{
    pub fn new(node: usize) -> Self {
        LabelStore {
            node,
            labels: Vec::new(),
            alive: Vec::new(),
            live: Vec::new(),
            cursor: 0,
        }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    /// Check, insert, then prune.
    ///
    /// The candidate is compared once against each survivor present before
    /// the call; ties with an existing label keep the existing one.
    pub fn try_insert(
        &mut self,
        candidate: Label<W>,
        windows: &[ResourceWindow<W>],
    ) -> Result<InsertOutcome> {
        if candidate.node() != self.node {
            return Err(Error::InvariantViolation(format!(
                "label for node {} offered to store of node {}",
                candidate.node(),
                self.node
            )));
        }
        if !feasible(candidate.resources(), windows) {
            return Ok(InsertOutcome::Infeasible);
        }
        if self.live.iter().any(|&slot| self.labels[slot].dominates(&candidate)) {
            return Ok(InsertOutcome::Dominated);
        }

        let before = self.live.len();
        let labels = &self.labels;
        let alive = &mut self.alive;
        self.live.retain(|&slot| {
            let keep = !candidate.dominates(&labels[slot]);
            if !keep {
                alive[slot] = false;
            }
            keep
        });
        let removed = before - self.live.len();

        let slot = self.labels.len();
        self.labels.push(candidate);
        self.alive.push(true);
        self.live.push(slot);

        Ok(InsertOutcome::Inserted {
            id: LabelId { node: self.node, slot },
            removed,
        })
    }

    /// Any label ever stored here, removed or not
    pub fn get(&self, slot: usize) -> Option<&Label<W>> {
        self.labels.get(slot)
    }

    pub fn is_alive(&self, slot: usize) -> bool {
        self.alive.get(slot).copied().unwrap_or(false)
    }

    /// Number of surviving labels
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of labels ever inserted (arena size)
    pub fn arena_len(&self) -> usize {
        self.labels.len()
    }

    /// Iterates over the surviving labels in insertion order
    pub fn survivors(&self) -> impl Iterator<Item = (LabelId, &Label<W>)> + '_ {
        self.live
            .iter()
            .map(move |&slot| (LabelId { node: self.node, slot }, &self.labels[slot]))
    }

    /// Surviving labels inserted since the previous call; advances the cursor
    pub fn take_pending(&mut self) -> Vec<LabelId> {
        let first = self.live.partition_point(|&slot| slot < self.cursor);
        let pending = self.live[first..]
            .iter()
            .map(|&slot| LabelId { node: self.node, slot })
            .collect();
        self.cursor = self.labels.len();
        pending
    }

    /// Whether some surviving label has not been handed out yet
    pub fn has_pending(&self) -> bool {
        self.live.last().map_or(false, |&slot| slot >= self.cursor)
    }

    /// Stores `label` without any check, for building corrupt chains in tests
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, label: Label<W>) -> LabelId {
        let slot = self.labels.len();
        self.labels.push(label);
        self.alive.push(true);
        self.live.push(slot);
        LabelId { node: self.node, slot }
    }

    /// Best surviving label by cost, then lexicographic resources
    pub fn best(&self) -> Option<(LabelId, &Label<W>)> {
        self.survivors().min_by(|(_, a), (_, b)| a.rank_cmp(b))
    }
}
