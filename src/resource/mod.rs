pub mod entry_rule;
pub mod window;

pub use entry_rule::EntryRule;
pub use window::{feasible, ResourceKind, ResourceWindow};
