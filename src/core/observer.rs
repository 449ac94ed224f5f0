use super::state::{ProcessState, SchedCtx};

/// Walks the whole context after every scheduling step and `debug_assert`s
/// the bookkeeping invariants. Compiled out of release builds.
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        for (&pid, &queue_id) in &ctx.queue_of {
            let process = ctx.process(pid);
            debug_assert_eq!(
                process.state,
                ProcessState::Queued,
                "membership map lists P{} but its state is {:?}",
                process.id,
                process.state
            );
            if let Some(queue) = ctx.queues.get(queue_id) {
                debug_assert!(
                    queue.contains(pid),
                    "membership map claims P{} in queue {queue_id:?}, but the queue does not hold it",
                    process.id
                );
            } else {
                debug_assert!(false, "membership map references unknown queue {queue_id:?}");
            }
        }

        for (pid, process) in ctx.processes.iter().enumerate() {
            debug_assert!(
                process.remaining <= process.burst_time,
                "P{} has more remaining burst than it started with",
                process.id
            );

            match process.state {
                ProcessState::Finished => {
                    debug_assert_eq!(
                        process.remaining, 0,
                        "finished P{} still has burst left",
                        process.id
                    );
                    debug_assert!(
                        !ctx.queue_of.contains_key(&pid),
                        "finished P{} still present in a queue",
                        process.id
                    );
                    let completion = process
                        .completion_time
                        .expect("finished process missing completion time");
                    debug_assert!(
                        completion >= process.arrival_time + process.burst_time,
                        "P{} completed before its minimum continuous run",
                        process.id
                    );
                }
                ProcessState::Queued => {
                    debug_assert!(
                        ctx.queue_of.contains_key(&pid),
                        "queued P{} missing from the membership map",
                        process.id
                    );
                    debug_assert!(process.completion_time.is_none());
                }
                ProcessState::Waiting => {
                    debug_assert!(process.completion_time.is_none());
                }
            }
        }

        if let Some(last) = ctx.timeline.segments().last() {
            debug_assert!(
                last.end <= ctx.now,
                "timeline runs ahead of the simulation clock"
            );
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
