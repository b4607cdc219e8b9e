pub mod capture_workflow;

pub use capture_workflow::{CaptureWorkflow, WorkflowMessage};
