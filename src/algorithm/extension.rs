use num_traits::Float;
use std::fmt::Debug;

use crate::algorithm::config::CycleRule;
use crate::data_structures::{Label, LabelId};
use crate::graph::{ResourceArc, ResourceNetwork};
use crate::resource::{feasible, ResourceKind, ResourceWindow};

/// Result of pushing one label across one arc
#[derive(Debug, Clone, PartialEq)]
pub enum Extension<W>
where
    W: Float + Debug,
{
    /// A feasible candidate for the head node's store
    Candidate(Label<W>),
    /// Some resource left its window
    Infeasible,
    /// The head node is in the label's remembered visited list
    Cycle,
}

/// Resource vector after traversing `arc`: additive sum, then the head
/// node's entry rule on calendar dimensions.
pub fn advance_resources<W, G>(
    graph: &G,
    windows: &[ResourceWindow<W>],
    resources: &[W],
    arc: &ResourceArc<W>,
) -> Vec<W>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    resources
        .iter()
        .zip(&arc.consumption)
        .zip(windows)
        .enumerate()
        .map(|(dimension, ((&value, &used), window))| {
            let summed = value + used;
            match (window.kind(), graph.entry_rule(arc.to, dimension)) {
                (ResourceKind::Calendar, Some(rule)) => rule.apply(summed),
                _ => summed,
            }
        })
        .collect()
}

/// Builds the candidate label obtained by extending `label` (stored under
/// `label_id`) along arc `arc_id`. The source label is never modified.
pub fn extend<W, G>(
    graph: &G,
    windows: &[ResourceWindow<W>],
    cycle_rule: CycleRule,
    label: &Label<W>,
    label_id: LabelId,
    arc_id: usize,
    arc: &ResourceArc<W>,
) -> Extension<W>
where
    W: Float + Debug,
    G: ResourceNetwork<W>,
{
    let visited = match label.visited() {
        Some(visited) if visited.contains(&arc.to) => return Extension::Cycle,
        Some(visited) => {
            let mut next = visited.to_vec();
            next.push(arc.to);
            if let Some(memory) = cycle_rule.memory() {
                let excess = next.len().saturating_sub(memory);
                next.drain(..excess);
            }
            Some(next)
        }
        None => None,
    };

    let resources = advance_resources(graph, windows, label.resources(), arc);
    if !feasible(&resources, windows) {
        return Extension::Infeasible;
    }

    Extension::Candidate(Label::extended(
        arc.to,
        label.cost() + arc.cost,
        resources,
        label_id,
        arc_id,
        visited,
    ))
}
