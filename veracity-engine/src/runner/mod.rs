//! Analysis run coordination: one full extract → analyze → aggregate
//! → score pass, artifact persistence, and the watch loop.

pub mod artifacts;
pub mod coordinator;
pub mod source;

pub use artifacts::ArtifactWriter;
pub use coordinator::{AnalysisCoordinator, CoordinatorConfig, Trigger, WatchHandle};
pub use source::{DocumentSource, JsonFileSource, StaticSource};
