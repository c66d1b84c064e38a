pub mod orchestration;

pub use orchestration::{run_label, run_version, ResolveArgs, WorkflowResult};
