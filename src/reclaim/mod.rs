pub mod manifest;
pub mod planner;
pub mod state;
pub mod engine;
pub mod batch;

pub use manifest::{ManifestParser, ManifestRow};
pub use planner::{PlanAction, ReclaimPlan, ReclaimPlanner};
pub use state::{RequestState, RequestTracker};
pub use engine::{ExecutionResult, ReclaimEngine};
pub use batch::{BatchSummary, OutcomeStatus, ReclaimOrchestrator, ReclaimOutcome};
