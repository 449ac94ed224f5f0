pub mod observer;
pub mod state;
pub mod timeline;

pub use observer::Observer;
pub use state::{JobId, Pid, Process, ProcessState, QueueId, ReadyQueue, SchedCtx, Ticks};
pub use timeline::{Segment, Tier, Timeline};
