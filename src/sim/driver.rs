use rustc_hash::FxHashSet;

use super::job::{Job, JobOutcome};
use super::metrics::{self, Metrics};
use crate::core::{Observer, SchedCtx, Timeline};
use crate::error::InputError;
use crate::scheduler::{Scheduler, StepOutcome};

/// Everything one run produces: the Gantt log, a fresh finalized row per
/// process (sorted by id), and the batch aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub timeline: Timeline,
    pub outcomes: Vec<JobOutcome>,
    pub metrics: Metrics,
}

/// Drives one scheduling discipline over one validated batch.
pub struct Sim<S: Scheduler> {
    pub ctx: SchedCtx,
    scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> Sim<S> {
    /// Fail-fast on invalid input, then admit the batch and let the
    /// scheduler register its queues.
    pub fn new(jobs: &[Job], mut scheduler: S) -> Result<Self, InputError> {
        validate(jobs)?;

        let mut ctx = SchedCtx::new();
        for job in jobs {
            ctx.admit(job.id, job.arrival_time, job.burst_time);
        }
        scheduler.init(&mut ctx);

        Ok(Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        })
    }

    /// Run to completion and report. Terminates because every non-idle step
    /// consumes remaining burst and idle steps only close arrival gaps.
    pub fn run(mut self) -> Schedule {
        loop {
            match self.scheduler.step(&mut self.ctx) {
                StepOutcome::Progress => self.observer.observe(&self.ctx),
                StepOutcome::Complete => break,
            }
        }
        debug_assert!(self.ctx.all_finished(), "scheduler completed with work left");

        let mut outcomes: Vec<JobOutcome> = self
            .ctx
            .processes
            .iter()
            .map(|p| JobOutcome {
                id: p.id,
                arrival_time: p.arrival_time,
                burst_time: p.burst_time,
                waiting_time: p.waiting_time().expect("process left unfinalized"),
                turnaround_time: p.turnaround_time().expect("process left unfinalized"),
                completion_time: p.completion_time.expect("process left unfinalized"),
            })
            .collect();
        outcomes.sort_by_key(|o| o.id);

        let metrics = metrics::summarize(&outcomes);
        Schedule {
            timeline: self.ctx.timeline,
            outcomes,
            metrics,
        }
    }
}

fn validate(jobs: &[Job]) -> Result<(), InputError> {
    if jobs.is_empty() {
        return Err(InputError::EmptyBatch);
    }

    let mut seen = FxHashSet::default();
    for job in jobs {
        if job.id == 0 {
            return Err(InputError::ZeroId);
        }
        if job.burst_time == 0 {
            return Err(InputError::ZeroBurst { id: job.id });
        }
        if !seen.insert(job.id) {
            return Err(InputError::DuplicateId { id: job.id });
        }
    }
    Ok(())
}
