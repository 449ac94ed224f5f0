use crate::core::{JobId, Ticks};

/// One process of the input batch: what the caller knows up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

impl Job {
    pub fn new(id: JobId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

/// Finalized per-process report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOutcome {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub completion_time: Ticks,
}
