//! Scenario fixtures: shared session state and scoped on-disk scaffolding.

pub mod scaffold;
pub mod session;

pub use scaffold::Scaffold;
pub use session::{HarnessOptions, Session, ToolPaths, DEFAULT_TOOL_TIMEOUT};
