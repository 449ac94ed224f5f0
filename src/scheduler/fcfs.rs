use super::{Scheduler, StepOutcome};
use crate::core::{Pid, SchedCtx};

/// First-come-first-served: arrival order, no preemption. Each process runs
/// its whole burst back-to-back, so `completion = max(previous completion,
/// arrival) + burst` falls out of the clock handling.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    order: Vec<Pid>,
    cursor: usize,
}

impl FcfsScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn init(&mut self, ctx: &mut SchedCtx) {
        self.order = (0..ctx.processes.len()).collect();
        // Stable sort: same-arrival processes keep their batch order.
        self.order
            .sort_by_key(|&pid| ctx.process(pid).arrival_time);
    }

    fn step(&mut self, ctx: &mut SchedCtx) -> StepOutcome {
        let Some(&pid) = self.order.get(self.cursor) else {
            return StepOutcome::Complete;
        };
        self.cursor += 1;

        let arrival = ctx.process(pid).arrival_time;
        if ctx.now < arrival {
            ctx.advance_to(arrival);
        }

        let burst = ctx.process(pid).remaining;
        ctx.run_slice(pid, burst, None);
        ctx.finalize(pid);
        StepOutcome::Progress
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::{Job, Sim};

    use super::*;

    fn jobs() -> Vec<Job> {
        vec![
            Job::new(1, 0, 5),
            Job::new(2, 1, 3),
            Job::new(3, 2, 1),
        ]
    }

    #[test]
    fn runs_in_arrival_order() {
        let schedule = Sim::new(&jobs(), FcfsScheduler::new()).unwrap().run();

        let completions: Vec<_> = schedule
            .outcomes
            .iter()
            .map(|o| o.completion_time)
            .collect();
        assert_eq!(completions, vec![5, 8, 9]);

        let waits: Vec<_> = schedule.outcomes.iter().map(|o| o.waiting_time).collect();
        assert_eq!(waits, vec![0, 4, 6]);
    }

    #[test]
    fn one_segment_per_process() {
        let schedule = Sim::new(&jobs(), FcfsScheduler::new()).unwrap().run();

        assert_eq!(schedule.timeline.len(), 3);
        for (segment, outcome) in schedule.timeline.iter().zip(&schedule.outcomes) {
            assert_eq!(segment.id, outcome.id);
            assert_eq!(segment.start, outcome.completion_time - outcome.burst_time);
            assert_eq!(segment.end, outcome.completion_time);
            assert_eq!(segment.tier, None);
        }
    }

    #[test]
    fn batch_order_does_not_matter() {
        let mut shuffled = jobs();
        shuffled.reverse();

        let a = Sim::new(&jobs(), FcfsScheduler::new()).unwrap().run();
        let b = Sim::new(&shuffled, FcfsScheduler::new()).unwrap().run();
        assert_eq!(a.outcomes, b.outcomes);
    }

    #[test]
    fn idles_until_late_arrival() {
        let jobs = vec![Job::new(1, 0, 2), Job::new(2, 10, 4)];
        let schedule = Sim::new(&jobs, FcfsScheduler::new()).unwrap().run();

        assert_eq!(schedule.outcomes[0].completion_time, 2);
        // Gap from t=2 to t=10 is idle; no segment covers it.
        assert_eq!(schedule.timeline.segments()[1].start, 10);
        assert_eq!(schedule.outcomes[1].completion_time, 14);
        assert_eq!(schedule.outcomes[1].waiting_time, 0);
    }
}
