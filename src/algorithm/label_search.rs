use log::{debug, info, trace, warn};
use num_traits::Float;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Debug;

use crate::algorithm::config::SpprcConfig;
use crate::algorithm::extension::{extend, Extension};
use crate::algorithm::path::{reconstruct, ResourcePath};
use crate::data_structures::{ActiveQueue, InsertOutcome, Label, LabelId, LabelStore};
use crate::graph::ResourceNetwork;
use crate::resource::ResourceWindow;
use crate::{Error, Result};

/// Global state of a label-correcting run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Active nodes remain
    Running,
    /// Fixpoint reached; every store is final
    Converged,
    /// Stopped by the insertion or step budget; stores are partial
    BudgetExceeded,
}

/// Counters collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes popped from the active set and processed
    pub steps: usize,
    /// Label/arc pairs examined
    pub extensions: usize,
    /// Candidates accepted by a store (the root label is not counted)
    pub insertions: usize,
    /// Candidates outside the resource windows
    pub rejected_infeasible: usize,
    /// Candidates dominated by an existing label
    pub rejected_dominated: usize,
    /// Candidates revisiting a remembered node
    pub rejected_cycle: usize,
    /// Stored labels later removed by a dominating arrival
    pub removed: usize,
    /// Labels alive in all stores when the run stopped
    pub surviving: usize,
}

/// The propagation scheduler: per-run label stores plus the active set.
///
/// Built by [`SpprcSolver::search`](crate::SpprcSolver::search) from
/// validated inputs. Each run owns its stores, so independent runs over the
/// same graph never share mutable state.
#[derive(Debug)]
pub struct LabelSearch<'a, W, G>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    graph: &'a G,
    windows: &'a [ResourceWindow<W>],
    config: SpprcConfig,
    source: usize,
    stores: Vec<LabelStore<W>>,
    active: ActiveQueue,
    /// Remaining nodes of a topological sweep, when one is in use
    sweep: Option<VecDeque<usize>>,
    status: SearchStatus,
    stats: SearchStats,
}

impl<'a, W, G> LabelSearch<'a, W, G>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    /// Creates the root label at `source` and marks it active.
    ///
    /// A baseline outside the windows leaves the source store empty, so the
    /// run converges immediately with nothing reachable.
    pub(crate) fn new(
        graph: &'a G,
        windows: &'a [ResourceWindow<W>],
        config: SpprcConfig,
        source: usize,
        baseline: Vec<W>,
    ) -> Result<Self> {
        if !graph.has_node(source) {
            return Err(Error::InvalidNode(source));
        }
        if baseline.len() != windows.len() {
            return Err(Error::DimensionMismatch {
                context: "baseline",
                expected: windows.len(),
                found: baseline.len(),
            });
        }

        let n = graph.node_count();
        let mut search = LabelSearch {
            graph,
            windows,
            source,
            stores: (0..n).map(LabelStore::new).collect(),
            active: ActiveQueue::new(n),
            sweep: None,
            status: SearchStatus::Running,
            stats: SearchStats::default(),
            config,
        };

        let root = Label::root(source, baseline, search.config.cycle_rule.tracks_visits());
        if search.stores[source].try_insert(root, windows)?.is_inserted() {
            search.active.push(source);
        } else {
            debug!("baseline at source {} is outside the resource windows", source);
        }

        if search.config.dag_sweep {
            if let Some(order) = graph.topological_order() {
                let start = order.iter().position(|&v| v == source).unwrap_or(0);
                search.sweep = Some(order.into_iter().skip(start).collect());
            } else {
                debug!("graph has a cycle, falling back to label correcting");
            }
        }
        Ok(search)
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// All label stores, indexed by node
    pub fn stores(&self) -> &[LabelStore<W>] {
        &self.stores
    }

    pub fn store(&self, node: usize) -> Option<&LabelStore<W>> {
        self.stores.get(node)
    }

    /// Total number of surviving labels across all nodes
    pub fn surviving_labels(&self) -> usize {
        self.stores.iter().map(|store| store.len()).sum()
    }

    /// Processes one active node. Returns the status afterwards.
    pub fn step(&mut self) -> Result<SearchStatus> {
        if self.status != SearchStatus::Running {
            return Ok(self.status);
        }

        let Some(node) = self.next_node() else {
            self.status = SearchStatus::Converged;
            return Ok(self.status);
        };
        if self.config.max_steps.map_or(false, |max| self.stats.steps >= max) {
            warn!("step budget of {} exhausted", self.stats.steps);
            self.status = SearchStatus::BudgetExceeded;
            return Ok(self.status);
        }
        self.stats.steps += 1;

        let pending = self.stores[node].take_pending();
        trace!("step {}: node {} with {} new labels", self.stats.steps, node, pending.len());
        if pending.is_empty() {
            return Ok(self.status);
        }

        let graph = self.graph;
        for (arc_id, arc) in graph.outgoing_arcs(node) {
            if arc.from != node || !graph.has_node(arc.to) {
                return Err(Error::InvariantViolation(format!(
                    "arc {} ({} -> {}) listed under node {}",
                    arc_id, arc.from, arc.to, node
                )));
            }
            for &id in &pending {
                // A self-loop may have pruned this label earlier in the step
                if !self.stores[node].is_alive(id.slot) {
                    continue;
                }
                let label = self.stores[node]
                    .get(id.slot)
                    .ok_or_else(|| Error::InvariantViolation(format!("missing label {:?}", id)))?;
                self.stats.extensions += 1;
                let rule = self.config.cycle_rule;
                let candidate = match extend(graph, self.windows, rule, label, id, arc_id, arc) {
                    Extension::Candidate(candidate) => candidate,
                    Extension::Infeasible => {
                        self.stats.rejected_infeasible += 1;
                        continue;
                    }
                    Extension::Cycle => {
                        self.stats.rejected_cycle += 1;
                        continue;
                    }
                };

                match self.stores[arc.to].try_insert(candidate, self.windows)? {
                    InsertOutcome::Inserted { removed, .. } => {
                        self.stats.insertions += 1;
                        self.stats.removed += removed;
                        self.active.push(arc.to);
                        if self
                            .config
                            .max_insertions
                            .map_or(false, |max| self.stats.insertions > max)
                        {
                            warn!("insertion budget of {} exceeded", self.stats.insertions - 1);
                            self.status = SearchStatus::BudgetExceeded;
                            return Ok(self.status);
                        }
                    }
                    InsertOutcome::Dominated => self.stats.rejected_dominated += 1,
                    InsertOutcome::Infeasible => self.stats.rejected_infeasible += 1,
                }
            }
        }
        Ok(self.status)
    }

    /// Steps until the run converges or exhausts its budget
    pub fn run(&mut self) -> Result<SearchStatus> {
        info!(
            "label search from node {} over {} nodes, {} arcs, {} resources",
            self.source,
            self.graph.node_count(),
            self.graph.arc_count(),
            self.windows.len()
        );
        while self.step()? == SearchStatus::Running {}
        self.stats.surviving = self.surviving_labels();
        debug!(
            "label search {:?} after {} steps: {} insertions, {} surviving labels",
            self.status,
            self.stats.steps,
            self.stats.insertions,
            self.stats.surviving
        );
        Ok(self.status)
    }

    /// Best surviving label at `node` (lowest cost, then lexicographic resources)
    pub fn best_label(&self, node: usize) -> Option<(LabelId, &Label<W>)> {
        self.stores.get(node).and_then(|store| store.best())
    }

    /// Path ending in the given label
    pub fn reconstruct(&self, label: LabelId) -> Result<ResourcePath<W>> {
        reconstruct(&self.stores, label)
    }

    /// Best path to `node`, if any label survives there
    pub fn best_path(&self, node: usize) -> Result<Option<ResourcePath<W>>> {
        self.best_label(node)
            .map(|(id, _)| self.reconstruct(id))
            .transpose()
    }

    /// Checks that no surviving label dominates another at any node
    pub fn verify_non_domination(&self) -> Result<()> {
        for store in &self.stores {
            let survivors: Vec<_> = store.survivors().collect();
            for (i, (a_id, a)) in survivors.iter().enumerate() {
                for (b_id, b) in survivors.iter().skip(i + 1) {
                    if a.dominates(b) || b.dominates(a) {
                        return Err(Error::InvariantViolation(format!(
                            "labels {:?} and {:?} at node {} are comparable",
                            a_id,
                            b_id,
                            store.node()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn next_node(&mut self) -> Option<usize> {
        match self.sweep.as_mut() {
            Some(order) => {
                // Every predecessor of a node precedes it, so each node is final
                // by the time it is reached
                while let Some(node) = order.pop_front() {
                    if self.stores[node].has_pending() {
                        return Some(node);
                    }
                }
                None
            }
            None => self.active.pop(),
        }
    }
}
