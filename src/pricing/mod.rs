pub mod knapsack;
pub mod spprc_pricer;
pub mod traits;

pub use knapsack::KnapsackPricer;
pub use spprc_pricer::SpprcPricer;
pub use traits::{PricingColumn, PricingSubproblem};
