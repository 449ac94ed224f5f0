use super::{Scheduler, StepOutcome};
use crate::core::{Pid, QueueId, SchedCtx, Tier, Ticks};
use crate::error::InputError;

#[derive(Debug, Clone, Copy)]
struct Tiers {
    rr: QueueId,
    fcfs: QueueId,
}

/// Two-level feedback queue. Every process gets its first touch on the
/// preemptive RR tier; whatever cannot finish inside one quantum is demoted
/// to the non-preemptive FCFS tier and never promoted back. The RR tier
/// strictly dominates: the FCFS tier runs only while no admitted process
/// sits on the RR tier.
#[derive(Debug)]
pub struct MlfqScheduler {
    quantum: Ticks,
    tiers: Option<Tiers>,
    order: Vec<Pid>,
    cursor: usize,
}

impl MlfqScheduler {
    pub fn new(quantum: Ticks) -> Result<Self, InputError> {
        if quantum == 0 {
            return Err(InputError::ZeroQuantum);
        }
        Ok(Self {
            quantum,
            tiers: None,
            order: Vec::new(),
            cursor: 0,
        })
    }

    /// Move every process that has arrived by now onto the RR tier, in
    /// arrival order.
    fn admit_arrived(&mut self, ctx: &mut SchedCtx, tiers: Tiers) {
        while let Some(&pid) = self.order.get(self.cursor) {
            let arrival = ctx.process(pid).arrival_time;
            if arrival > ctx.now {
                break;
            }
            ctx.queue_push(tiers.rr, pid, arrival);
            self.cursor += 1;
        }
    }
}

impl Scheduler for MlfqScheduler {
    fn init(&mut self, ctx: &mut SchedCtx) {
        self.tiers = Some(Tiers {
            rr: ctx.create_queue(),
            fcfs: ctx.create_queue(),
        });
        self.order = (0..ctx.processes.len()).collect();
        self.order
            .sort_by_key(|&pid| ctx.process(pid).arrival_time);
    }

    fn step(&mut self, ctx: &mut SchedCtx) -> StepOutcome {
        let tiers = self.tiers.expect("init() registers both tier queues");
        self.admit_arrived(ctx, tiers);

        if let Some((pid, ready_at)) = ctx.queue_pop_front(tiers.rr) {
            debug_assert!(ready_at <= ctx.now, "RR tier holds an unarrived process");

            let slice = ctx.process(pid).remaining.min(self.quantum);
            ctx.run_slice(pid, slice, Some(Tier::RoundRobin));

            if ctx.process(pid).remaining > 0 {
                // One quantum was not enough: drops to the FCFS tier for
                // the rest of its burst.
                let now = ctx.now;
                ctx.queue_push(tiers.fcfs, pid, now);
            } else {
                ctx.finalize(pid);
            }
            return StepOutcome::Progress;
        }

        if let Some((pid, _)) = ctx.queue_pop_front(tiers.fcfs) {
            let remaining = ctx.process(pid).remaining;
            ctx.run_slice(pid, remaining, Some(Tier::Fcfs));
            ctx.finalize(pid);
            return StepOutcome::Progress;
        }

        // Both tiers drained but arrivals remain: jump to the next one.
        if let Some(&pid) = self.order.get(self.cursor) {
            let arrival = ctx.process(pid).arrival_time;
            ctx.advance_to(arrival);
            return StepOutcome::Progress;
        }

        StepOutcome::Complete
    }
}
