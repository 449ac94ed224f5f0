use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use super::timeline::{Segment, Tier, Timeline};

// Index into the process table
pub type Pid = usize;
// Caller-facing process identifier (positive, unique per batch)
pub type JobId = u32;
pub type Ticks = u64;
new_key_type! {
    pub struct QueueId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Not in any queue: either not yet picked up or between a dequeue
    /// and the requeue/finalize that ends the current step.
    Waiting,
    Queued,
    Finished,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining: Ticks,
    pub state: ProcessState,
    pub completion_time: Option<Ticks>,
}

impl Process {
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }
}

/// Position of a queue entry: ready time first, then insertion order so
/// same-time entries come out in the order they went in.
// KeyedPriorityQueue is a max-heap, so ReadyKey flips its Ord
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct ReadyKey {
    pub at: Ticks,
    pub seq: u64,
}

impl PartialOrd for ReadyKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ReadyKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.at.cmp(&self.at).then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Ready-time-ordered queue. Front = earliest ready time; ties resolve to
/// the earliest-inserted entry.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: KeyedPriorityQueue<Pid, ReadyKey>,
    next_seq: u64,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, pid: Pid, ready_at: Ticks) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(pid, ReadyKey { at: ready_at, seq });
    }

    pub fn dequeue_front(&mut self) -> Option<(Pid, Ticks)> {
        self.entries.pop().map(|(pid, key)| (pid, key.at))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.iter().any(|e| *e.0 == pid)
    }
}

/// Mutable heart of one simulation run: the virtual clock, the process
/// table, every ready queue a strategy registered, and the Gantt log.
#[derive(Debug)]
pub struct SchedCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub queues: SlotMap<QueueId, ReadyQueue>,
    pub queue_of: FxHashMap<Pid, QueueId>,
    pub timeline: Timeline,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            processes: Vec::new(),
            queues: SlotMap::with_key(),
            queue_of: FxHashMap::default(),
            timeline: Timeline::new(),
        }
    }

    pub fn admit(&mut self, id: JobId, arrival_time: Ticks, burst_time: Ticks) -> Pid {
        let pid = self.processes.len();
        self.processes.push(Process {
            id,
            arrival_time,
            burst_time,
            remaining: burst_time,
            state: ProcessState::Waiting,
            completion_time: None,
        });
        pid
    }

    pub fn create_queue(&mut self) -> QueueId {
        self.queues.insert(ReadyQueue::new())
    }

    pub fn queue_push(&mut self, queue: QueueId, pid: Pid, ready_at: Ticks) {
        assert!(
            !self.queue_of.contains_key(&pid),
            "process {pid} already present in some queue"
        );

        let process = self.process_mut(pid);
        debug_assert!(
            process.state != ProcessState::Finished,
            "finished process {} cannot be enqueued",
            process.id
        );
        process.state = ProcessState::Queued;

        log::trace!("enqueue P{} ready at t={ready_at}", self.processes[pid].id);
        let rq = self.queues.get_mut(queue).expect("unknown ready queue");
        rq.enqueue(pid, ready_at);
        self.queue_of.insert(pid, queue);
    }

    /// Pop the earliest-ready process off `queue`, returning it together
    /// with its ready time so the caller can close an idle gap.
    pub fn queue_pop_front(&mut self, queue: QueueId) -> Option<(Pid, Ticks)> {
        let rq = self.queues.get_mut(queue)?;
        let (pid, ready_at) = rq.dequeue_front()?;

        let removed = self.queue_of.remove(&pid);
        debug_assert!(removed.is_some(), "process {pid} missing queue membership");
        self.process_mut(pid).state = ProcessState::Waiting;

        Some((pid, ready_at))
    }

    /// Jump the clock across an idle gap.
    pub fn advance_to(&mut self, t: Ticks) {
        debug_assert!(t >= self.now, "clock may not move backwards");
        self.now = t;
    }

    /// Execute `len` ticks of `pid` at the current clock, logging one
    /// timeline segment and consuming that much remaining burst.
    pub fn run_slice(&mut self, pid: Pid, len: Ticks, tier: Option<Tier>) {
        debug_assert!(len > 0, "zero-length slice");
        let start = self.now;
        let end = start + len;

        let process = &mut self.processes[pid];
        debug_assert!(
            len <= process.remaining,
            "slice exceeds remaining burst of process {}",
            process.id
        );
        debug_assert!(start >= process.arrival_time);
        process.remaining -= len;
        let id = process.id;

        match tier {
            Some(tier) => log::debug!("t={start}..{end} run P{id} [{tier}]"),
            None => log::debug!("t={start}..{end} run P{id}"),
        }
        self.now = end;
        self.timeline.record(Segment {
            id,
            start,
            end,
            tier,
        });
    }

    /// Mark `pid` done at the current clock. Valid exactly once, only after
    /// its full burst has been executed.
    pub fn finalize(&mut self, pid: Pid) {
        debug_assert!(
            !self.queue_of.contains_key(&pid),
            "finalizing process {pid} that is still enqueued"
        );

        let now = self.now;
        let process = &mut self.processes[pid];
        debug_assert_eq!(
            process.remaining, 0,
            "process {} finalized with burst left",
            process.id
        );
        debug_assert!(
            process.completion_time.is_none(),
            "completion time of process {} set twice",
            process.id
        );
        debug_assert!(
            now >= process.arrival_time + process.burst_time,
            "process {} finished before its minimum continuous run",
            process.id
        );

        process.state = ProcessState::Finished;
        process.completion_time = Some(now);
        log::debug!("t={now} P{} finished", process.id);
    }

    pub fn in_any_queue(&self, pid: Pid) -> bool {
        self.queue_of.contains_key(&pid)
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.processes[pid]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        &mut self.processes[pid]
    }

    pub fn all_finished(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.state == ProcessState::Finished)
    }
}

impl Default for SchedCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_queue_orders_by_ready_time() {
        let mut rq = ReadyQueue::new();
        rq.enqueue(0, 7);
        rq.enqueue(1, 3);
        rq.enqueue(2, 5);

        assert_eq!(rq.dequeue_front(), Some((1, 3)));
        assert_eq!(rq.dequeue_front(), Some((2, 5)));
        assert_eq!(rq.dequeue_front(), Some((0, 7)));
        assert_eq!(rq.dequeue_front(), None);
    }

    #[test]
    fn ready_queue_ties_keep_insertion_order() {
        let mut rq = ReadyQueue::new();
        rq.enqueue(4, 2);
        rq.enqueue(9, 2);
        rq.enqueue(1, 2);

        assert_eq!(rq.dequeue_front(), Some((4, 2)));
        assert_eq!(rq.dequeue_front(), Some((9, 2)));
        assert_eq!(rq.dequeue_front(), Some((1, 2)));
    }

    #[test]
    fn late_requeue_goes_behind_same_time_peers() {
        let mut rq = ReadyQueue::new();
        rq.enqueue(0, 4);
        rq.enqueue(1, 4);
        assert_eq!(rq.dequeue_front(), Some((0, 4)));
        // Requeued at the same tick it left; the older entry wins the tie.
        rq.enqueue(0, 4);
        assert_eq!(rq.dequeue_front(), Some((1, 4)));
        assert_eq!(rq.dequeue_front(), Some((0, 4)));
    }

    #[test]
    fn run_slice_consumes_burst_and_advances_clock() {
        let mut ctx = SchedCtx::new();
        let pid = ctx.admit(1, 0, 5);
        ctx.run_slice(pid, 2, None);

        assert_eq!(ctx.now, 2);
        assert_eq!(ctx.process(pid).remaining, 3);
        assert_eq!(ctx.timeline.segments().len(), 1);

        ctx.run_slice(pid, 3, None);
        ctx.finalize(pid);
        assert_eq!(ctx.process(pid).completion_time, Some(5));
        assert_eq!(ctx.process(pid).turnaround_time(), Some(5));
        assert_eq!(ctx.process(pid).waiting_time(), Some(0));
    }

    #[test]
    fn membership_tracks_queue_residency() {
        let mut ctx = SchedCtx::new();
        let q = ctx.create_queue();
        let pid = ctx.admit(1, 0, 1);

        ctx.queue_push(q, pid, 0);
        assert!(ctx.in_any_queue(pid));
        assert_eq!(ctx.process(pid).state, ProcessState::Queued);

        let popped = ctx.queue_pop_front(q);
        assert_eq!(popped, Some((pid, 0)));
        assert!(!ctx.in_any_queue(pid));
        assert_eq!(ctx.process(pid).state, ProcessState::Waiting);
    }

    #[test]
    #[should_panic(expected = "already present in some queue")]
    fn double_enqueue_is_rejected() {
        let mut ctx = SchedCtx::new();
        let a = ctx.create_queue();
        let b = ctx.create_queue();
        let pid = ctx.admit(1, 0, 1);
        ctx.queue_push(a, pid, 0);
        ctx.queue_push(b, pid, 0);
    }
}
