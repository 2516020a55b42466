//! Rule-weights store: atomically swapped snapshots with polled
//! hot reload.

pub mod probe;
pub mod store;

pub use probe::{ChangeProbe, FileMtimeProbe};
pub use store::{ReloadOutcome, WeightsSnapshot, WeightsStore};
