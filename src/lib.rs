pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::InputError;
pub use scheduler::{FcfsScheduler, MlfqScheduler, RoundRobinScheduler, Scheduler};
pub use sim::{Job, JobOutcome, Metrics, Schedule, Sim};
