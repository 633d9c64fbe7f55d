pub mod brute_force;
pub mod config;
pub mod extension;
pub mod label_search;
pub mod path;
pub mod solver;

pub use brute_force::BruteForce;
pub use config::{CycleRule, SpprcConfig};
pub use label_search::{LabelSearch, SearchStats, SearchStatus};
pub use path::{replay_path, PathStep, ResourcePath};
pub use solver::{SpprcOutcome, SpprcSolution, SpprcSolver};
