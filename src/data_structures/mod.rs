pub mod active_queue;
pub mod label;
pub mod label_store;

pub use active_queue::ActiveQueue;
pub use label::{Label, LabelId};
pub use label_store::{InsertOutcome, LabelStore};
