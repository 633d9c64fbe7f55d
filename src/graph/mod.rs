pub mod directed;
pub mod generators;
pub mod traits;

pub use directed::ResourceGraph;
pub use traits::{ResourceArc, ResourceNetwork};
