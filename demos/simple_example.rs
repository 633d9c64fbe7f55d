use spprc::graph::ResourceGraph;
use spprc::{EntryRule, ResourceWindow, SpprcConfig, SpprcOutcome, SpprcSolver};

fn main() -> spprc::Result<()> {
    env_logger::init();

    // Nodes: 0 = depot start, 1..=3 customers, 4 = depot end
    // Dimension 0: load (additive), dimension 1: time of day (calendar)
    let mut graph = ResourceGraph::with_nodes(5, 2);
    graph.add_arc(0, 1, 4.0, vec![3.0, 2.0])?;
    graph.add_arc(0, 2, 3.0, vec![4.0, 5.0])?;
    graph.add_arc(1, 2, -6.0, vec![4.0, 2.0])?;
    graph.add_arc(1, 3, 2.0, vec![2.0, 3.0])?;
    graph.add_arc(2, 3, -5.0, vec![2.0, 1.0])?;
    graph.add_arc(2, 4, 2.0, vec![0.0, 4.0])?;
    graph.add_arc(3, 4, 1.0, vec![0.0, 2.0])?;

    // Customer 2 opens at 6; arriving earlier means waiting
    graph.set_entry_rule(2, 1, EntryRule::Floor(6.0))?;

    let windows = vec![
        ResourceWindow::additive(0, 0.0, 8.0)?,
        ResourceWindow::calendar(1, 0.0, 10.0)?,
    ];

    println!("--- Pricing a route ---");
    let solver = SpprcSolver::new(&graph, &windows, SpprcConfig::new())?;
    let solution = solver.solve(0, 4)?;

    match &solution.outcome {
        SpprcOutcome::Optimal { path } => {
            println!("Best route {:?} with reduced cost {:.1}", path.nodes, path.cost);
            for step in &path.steps {
                println!(
                    "  node {}: cost {:.1}, load {:.1}, time {:.1}",
                    step.node, step.cost, step.resources[0], step.resources[1]
                );
            }
        }
        SpprcOutcome::Infeasible => println!("No feasible route"),
        SpprcOutcome::BudgetExceeded { .. } => println!("Search truncated"),
    }
    println!(
        "{} insertions, {} dominated, {} infeasible",
        solution.stats.insertions,
        solution.stats.rejected_dominated,
        solution.stats.rejected_infeasible
    );

    Ok(())
}
