pub mod driver;
pub mod job;
pub mod metrics;

pub use driver::{Schedule, Sim};
pub use job::{Job, JobOutcome};
pub use metrics::{summarize, Metrics};
