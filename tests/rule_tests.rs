use spprc::graph::ResourceGraph;
use spprc::{
    CycleRule, EntryRule, Error, ResourceWindow, SearchStatus, SpprcConfig, SpprcOutcome,
    SpprcSolver,
};

fn calendar_window(max: f64) -> Vec<ResourceWindow<f64>> {
    vec![ResourceWindow::calendar(0, 0.0, max).unwrap()]
}

// Test helper: 0 -> 1 -> 2 with a rule on node 1
fn chain_with_rule(first: f64, second: f64, rule: EntryRule<f64>) -> ResourceGraph<f64> {
    let mut graph = ResourceGraph::with_nodes(3, 1);
    graph.add_arc(0, 1, 1.0, vec![first]).unwrap();
    graph.add_arc(1, 2, 1.0, vec![second]).unwrap();
    graph.set_entry_rule(1, 0, rule).unwrap();
    graph
}

#[test]
fn test_floor_rule_waits_for_opening() {
    let graph = chain_with_rule(2.0, 1.0, EntryRule::Floor(6.0));
    let windows = calendar_window(10.0);
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap();
    let path = solver.solve(0, 2).unwrap().outcome.path().cloned().unwrap();

    assert_eq!(path.steps[1].resources, vec![6.0]);
    assert_eq!(path.resources, vec![7.0]);

    // The wait pushes the arrival past a tighter horizon
    let tight = calendar_window(6.5);
    let solver = SpprcSolver::new(&graph, &tight, SpprcConfig::new()).unwrap();
    assert!(solver.solve(0, 2).unwrap().outcome.is_infeasible());
}

#[test]
fn test_reset_rule_restarts_the_clock() {
    let graph = chain_with_rule(9.0, 8.0, EntryRule::Reset(0.0));
    let windows = calendar_window(10.0);
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap();
    let path = solver.solve(0, 2).unwrap().outcome.path().cloned().unwrap();

    assert_eq!(path.steps[1].resources, vec![0.0]);
    assert_eq!(path.resources, vec![8.0]);
}

#[test]
fn test_clamp_rule_caps_the_value() {
    let graph = chain_with_rule(9.0, 4.0, EntryRule::Clamp { lo: 2.0, hi: 5.0 });
    let windows = calendar_window(10.0);
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap();
    let path = solver.solve(0, 2).unwrap().outcome.path().cloned().unwrap();

    assert_eq!(path.steps[1].resources, vec![5.0]);
    assert_eq!(path.resources, vec![9.0]);
}

#[test]
fn test_entry_rule_on_additive_dimension_is_rejected() {
    let graph = chain_with_rule(1.0, 1.0, EntryRule::Floor(3.0));
    let windows = vec![ResourceWindow::additive(0, 0.0, 10.0).unwrap()];
    let err = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap_err();
    assert_eq!(err, Error::EntryRuleOnAdditive { node: 1, dimension: 0 });
}

#[test]
fn test_malformed_rules_and_windows_are_rejected() {
    let mut graph = ResourceGraph::<f64>::with_nodes(2, 1);
    assert!(graph.set_entry_rule(1, 0, EntryRule::Clamp { lo: 4.0, hi: 1.0 }).is_err());
    assert!(graph.set_entry_rule(1, 3, EntryRule::Floor(1.0)).is_err());
    assert!(graph.set_entry_rule(7, 0, EntryRule::Floor(1.0)).is_err());
    assert!(ResourceWindow::<f64>::additive(0, 5.0, 1.0).is_err());

    let windows = vec![
        ResourceWindow::additive(0, 0.0, 1.0).unwrap(),
        ResourceWindow::additive(1, 0.0, 1.0).unwrap(),
    ];
    let err = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 1, found: 2, .. }));
}

// A cheaper label found later evicts the first one and reactivates the node,
// so the sink label built from the evicted one is replaced as well
#[test]
fn test_late_dominating_label_propagates() {
    let mut graph = ResourceGraph::with_nodes(4, 1);
    graph.add_arc(0, 1, 5.0, vec![3.0]).unwrap();
    graph.add_arc(0, 2, 1.0, vec![1.0]).unwrap();
    graph.add_arc(1, 3, 1.0, vec![1.0]).unwrap();
    graph.add_arc(2, 1, 1.0, vec![1.0]).unwrap();
    let windows = vec![ResourceWindow::additive(0, 0.0, 10.0).unwrap()];
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap();

    let mut search = solver.search(0, &[0.0]).unwrap();
    search.run().unwrap();
    assert_eq!(search.store(1).unwrap().len(), 1);
    assert_eq!(search.store(3).unwrap().len(), 1);
    assert!(search.stats().removed >= 2);

    let path = search.best_path(3).unwrap().unwrap();
    assert_eq!(path.nodes, vec![0, 2, 1, 3]);
    assert_eq!(path.cost, 3.0);
    assert_eq!(path.resources, vec![3.0]);
}

// Test helper: a profitable two-cycle 1 <-> 2 between source 0 and sink 3
fn cycle_graph() -> (ResourceGraph<f64>, Vec<ResourceWindow<f64>>) {
    let mut graph = ResourceGraph::with_nodes(4, 1);
    graph.add_arc(0, 1, 0.0, vec![0.0]).unwrap();
    graph.add_arc(1, 2, -1.0, vec![1.0]).unwrap();
    graph.add_arc(2, 1, -1.0, vec![1.0]).unwrap();
    graph.add_arc(1, 3, 0.0, vec![0.0]).unwrap();
    (graph, vec![ResourceWindow::additive(0, 0.0, 5.0).unwrap()])
}

#[test]
fn test_unrestricted_rule_cycles_until_resources_run_out() {
    let (graph, windows) = cycle_graph();
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new()).unwrap();
    let path = solver.solve(0, 3).unwrap().outcome.path().cloned().unwrap();

    assert_eq!(path.cost, -4.0);
    assert_eq!(path.nodes, vec![0, 1, 2, 1, 2, 1, 3]);
    assert_eq!(path.resources, vec![4.0]);
}

#[test]
fn test_elementary_rule_forbids_revisits() {
    let (graph, windows) = cycle_graph();
    let config = SpprcConfig::new().with_cycle_rule(CycleRule::Elementary);
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();
    let solution = solver.solve(0, 3).unwrap();
    let path = solution.outcome.path().unwrap();

    assert_eq!(path.nodes, vec![0, 1, 3]);
    assert_eq!(path.cost, 0.0);
    assert!(solution.stats.rejected_cycle > 0);
}

#[test]
fn test_recent_rule_memory() {
    let (graph, windows) = cycle_graph();

    // Two remembered nodes are enough to forbid the two-cycle
    let config = SpprcConfig::new().with_cycle_rule(CycleRule::Recent(2));
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();
    assert_eq!(solver.solve(0, 3).unwrap().outcome.path().unwrap().cost, 0.0);

    // Remembering only the head forbids self-loops and nothing else
    let config = SpprcConfig::new().with_cycle_rule(CycleRule::Recent(1));
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();
    assert_eq!(solver.solve(0, 3).unwrap().outcome.path().unwrap().cost, -4.0);

    let config = SpprcConfig::new().with_cycle_rule(CycleRule::Recent(0));
    assert!(matches!(
        SpprcSolver::new(&graph, &windows, config),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_step_budget() {
    let (graph, windows) = cycle_graph();
    let config = SpprcConfig::new().with_max_steps(1);
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();
    let solution = solver.solve(0, 3).unwrap();

    assert_eq!(solution.stats.steps, 1);
    assert_eq!(solution.outcome, SpprcOutcome::BudgetExceeded { incumbent: None });
}

#[test]
fn test_budget_keeps_incumbent() {
    let (graph, windows) = cycle_graph();
    // Node 0, then node 1 reaches the sink before the cycle is explored
    let config = SpprcConfig::new().with_max_steps(2);
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();
    let solution = solver.solve(0, 3).unwrap();

    match solution.outcome {
        SpprcOutcome::BudgetExceeded { incumbent: Some(path) } => {
            assert_eq!(path.nodes, vec![0, 1, 3]);
            assert_eq!(path.cost, 0.0);
        }
        other => panic!("expected a truncated run with an incumbent, got {:?}", other),
    }
}

// A free, profitable self-loop improves the label at node 1 on every lap
fn free_loop_graph() -> (ResourceGraph<f64>, Vec<ResourceWindow<f64>>) {
    let mut graph = ResourceGraph::with_nodes(3, 1);
    graph.add_arc(0, 1, 0.0, vec![0.0]).unwrap();
    graph.add_arc(1, 2, 0.0, vec![0.0]).unwrap();
    graph.add_arc(1, 1, -1.0, vec![0.0]).unwrap();
    (graph, vec![ResourceWindow::additive(0, 0.0, 1.0).unwrap()])
}

#[test]
fn test_free_negative_cycle_needs_a_budget() {
    let (graph, windows) = free_loop_graph();
    let config = SpprcConfig::new().with_max_insertions(20_000);
    let solver = SpprcSolver::new(&graph, &windows, config).unwrap();

    let mut search = solver.search(0, &[0.0]).unwrap();
    assert_eq!(search.run().unwrap(), SearchStatus::BudgetExceeded);
    assert_eq!(search.stats().insertions, 20_001);

    // Each lap replaces the only label, so the stores never grow past one
    // survivor even though every label stays in the arena
    let looping = search.store(1).unwrap();
    assert_eq!(looping.len(), 1);
    assert_eq!(looping.survivors().count(), 1);
    assert_eq!(looping.arena_len(), 10_001);
    assert_eq!(search.store(2).unwrap().len(), 1);
    search.verify_non_domination().unwrap();

    let solution = solver.solve(0, 2).unwrap();
    match solution.outcome {
        SpprcOutcome::BudgetExceeded { incumbent: Some(path) } => {
            assert_eq!(path.cost, -9_999.0);
            assert_eq!(path.nodes.len(), 10_002);
            assert_eq!(path.nodes.last(), Some(&2));
        }
        other => panic!("expected a truncated run with an incumbent, got {:?}", other),
    }
}
