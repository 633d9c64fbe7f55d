use rand::rngs::StdRng;
use rand::SeedableRng;
use spprc::algorithm::{SpprcConfig, SpprcSolver};
use spprc::graph::generators::{generate_layered_dag, GeneratedInstance};
use spprc::graph::ResourceNetwork;
use std::time::{Duration, Instant};

// Function to time one configuration on an instance
fn benchmark_config(name: &str, instance: &GeneratedInstance, config: SpprcConfig) -> Duration {
    println!("Running {} on graph with {} nodes...", name, instance.graph.node_count());

    let solver = match SpprcSolver::new(&instance.graph, &instance.windows, config) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("  - invalid instance: {}", e);
            return Duration::ZERO;
        }
    };

    let start = Instant::now();
    let result = solver.solve(instance.source, instance.sink);
    let duration = start.elapsed();

    match result {
        Ok(solution) => {
            let cost = solution.outcome.path().map(|path| path.cost);
            println!(
                "  - cost {:?}, {} insertions, {} steps in {:?}",
                cost, solution.stats.insertions, solution.stats.steps, duration
            );
        }
        Err(e) => eprintln!("  - failed: {}", e),
    }
    duration
}

fn main() {
    env_logger::init();

    // (layers, width) pairs to test
    let shapes = vec![(4, 4), (8, 6), (12, 8), (16, 10), (20, 12)];
    let resources = 2;
    let density = 0.5;

    println!("=====================================================");
    println!("Benchmark: label correcting vs topological sweep");
    println!("{} resources, arc density {}", resources, density);
    println!("=====================================================");

    let mut rng = StdRng::seed_from_u64(7);
    let mut results = Vec::new();

    for &(layers, width) in &shapes {
        let capacity = (layers as f64) * 2.5;
        let generated =
            generate_layered_dag(&mut rng, layers, width, resources, density, capacity);
        let instance = match generated {
            Ok(instance) => instance,
            Err(e) => {
                eprintln!("generation failed: {}", e);
                continue;
            }
        };
        println!(
            "\nLayered DAG {}x{}: {} arcs, capacity {}",
            layers,
            width,
            instance.graph.arc_count(),
            capacity
        );

        let fifo_time = benchmark_config("FIFO label correcting", &instance, SpprcConfig::new());
        let sweep_time = benchmark_config(
            "Topological sweep",
            &instance,
            SpprcConfig::new().with_dag_sweep(true),
        );
        results.push((layers, width, fifo_time, sweep_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15}", "Shape", "FIFO (ms)", "Sweep (ms)");
    println!("-----------------------------------------------------");
    for (layers, width, fifo_time, sweep_time) in &results {
        println!(
            "{:<10} | {:<15.3} | {:<15.3}",
            format!("{}x{}", layers, width),
            fifo_time.as_secs_f64() * 1000.0,
            sweep_time.as_secs_f64() * 1000.0
        );
    }
}
