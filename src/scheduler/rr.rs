use super::{Scheduler, StepOutcome};
use crate::core::{QueueId, SchedCtx, Ticks};
use crate::error::InputError;

/// Preemptive round robin over a single ready queue. Every process is
/// seeded keyed by its arrival time; a preempted process rejoins keyed by
/// the clock, which places it behind peers already ready at that instant.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    quantum: Ticks,
    ready: Option<QueueId>,
}

impl RoundRobinScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, InputError> {
        if quantum == 0 {
            return Err(InputError::ZeroQuantum);
        }
        Ok(Self {
            quantum,
            ready: None,
        })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn init(&mut self, ctx: &mut SchedCtx) {
        let ready = ctx.create_queue();
        for pid in 0..ctx.processes.len() {
            let arrival = ctx.process(pid).arrival_time;
            ctx.queue_push(ready, pid, arrival);
        }
        self.ready = Some(ready);
    }

    fn step(&mut self, ctx: &mut SchedCtx) -> StepOutcome {
        let ready = self.ready.expect("init() registers the ready queue");
        let Some((pid, ready_at)) = ctx.queue_pop_front(ready) else {
            return StepOutcome::Complete;
        };

        // Front of the queue may still be in the future; the CPU sits idle
        // until it arrives.
        if ctx.now < ready_at {
            ctx.advance_to(ready_at);
        }

        let slice = ctx.process(pid).remaining.min(self.quantum);
        ctx.run_slice(pid, slice, None);

        if ctx.process(pid).remaining > 0 {
            let now = ctx.now;
            ctx.queue_push(ready, pid, now);
        } else {
            ctx.finalize(pid);
        }
        StepOutcome::Progress
    }
}
