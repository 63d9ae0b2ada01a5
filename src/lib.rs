pub mod axis;
pub mod codec;
pub mod config;
pub mod constraint;
pub mod entry;
pub mod error;
pub mod host;
pub mod listing;
pub mod session;
pub mod table;

// scene object names as reported by the host
pub type SourceId = String;
pub type TargetId = String;

pub use axis::{Axis, AxisMask, SkipArgument};
pub use codec::MappingDocument;
pub use config::ToolConfig;
pub use constraint::{ConstraintKind, ConstraintSpec};
pub use entry::PairEntry;
pub use error::{MappingError, PolicyViolation};
pub use host::{ConstraintHost, FileDialog, SceneQuery};
pub use session::MatchingSession;
pub use table::MappingTable;
