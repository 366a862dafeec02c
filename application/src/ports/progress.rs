//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.

use council_domain::{CouncilStage, Model};

/// Callback for progress updates during a council run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console progress bars, plain log lines).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: CouncilStage, total_tasks: usize);

    /// Called when a model finishes within a stage
    fn on_task_complete(&self, stage: CouncilStage, model: &Model, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: CouncilStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: CouncilStage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: CouncilStage, _model: &Model, _success: bool) {}
    fn on_stage_complete(&self, _stage: CouncilStage) {}
}
