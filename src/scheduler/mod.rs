pub mod fcfs;
pub mod mlfq;
pub mod rr;

use crate::core::SchedCtx;

pub use fcfs::FcfsScheduler;
pub use mlfq::MlfqScheduler;
pub use rr::RoundRobinScheduler;

/// What a single call to [`Scheduler::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The clock moved, a slice ran, or a process was admitted.
    Progress,
    /// Nothing left anywhere; every process is finalized.
    Complete,
}

/// One scheduling discipline. The driver calls `init` once against a fully
/// admitted context, then `step` until it reports [`StepOutcome::Complete`].
pub trait Scheduler {
    /// Register ready queues and seed initial state.
    fn init(&mut self, ctx: &mut SchedCtx);

    /// Make one scheduling decision: admit eligible work, pick a process,
    /// run one slice or segment, requeue or finalize it.
    fn step(&mut self, ctx: &mut SchedCtx) -> StepOutcome;
}
