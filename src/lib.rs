//! SPPRC - Shortest Path Problem with Resource Constraints
//!
//! This library finds a minimum-cost source-to-sink path in a directed graph
//! such that every accumulated resource (time, load, count, ...) stays inside
//! its feasibility window along the path. It is the pricing subproblem solved
//! repeatedly inside column-generation algorithms.
//!
//! The core is a label-correcting search: every node owns a store of
//! pairwise non-dominating labels, and nodes are re-activated whenever a new
//! label survives at them, until a fixpoint is reached.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod instance;
pub mod pricing;
pub mod resource;

/// Re-export main types for convenient use
pub use algorithm::{
    BruteForce, CycleRule, LabelSearch, ResourcePath, SearchStats, SearchStatus, SpprcConfig,
    SpprcOutcome, SpprcSolution, SpprcSolver,
};
pub use graph::{ResourceArc, ResourceGraph, ResourceNetwork};
pub use instance::ProblemInstance;
pub use pricing::{KnapsackPricer, PricingColumn, PricingSubproblem, SpprcPricer};
pub use resource::{EntryRule, ResourceKind, ResourceWindow};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid node ID: {0}")]
    InvalidNode(usize),

    #[error("Invalid arc ID: {0}")]
    InvalidArc(usize),

    #[error("Dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid window on dimension {dimension}: min {min} > max {max}")]
    InvalidWindow { dimension: usize, min: f64, max: f64 },

    #[error("Invalid consumption {value} on dimension {dimension}")]
    InvalidConsumption { dimension: usize, value: f64 },

    #[error("Non-finite arc cost: {0}")]
    InvalidCost(f64),

    #[error("Entry rule on node {node} targets additive dimension {dimension}")]
    EntryRuleOnAdditive { node: usize, dimension: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
