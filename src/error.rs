use thiserror::Error;

use crate::core::JobId;

/// Rejected before any scheduling runs; the engine never produces a
/// partial result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("batch contains no processes")]
    EmptyBatch,

    #[error("process {id} has a zero burst time")]
    ZeroBurst { id: JobId },

    #[error("process id 0 is not a valid identifier; ids start at 1")]
    ZeroId,

    #[error("process id {id} appears more than once in the batch")]
    DuplicateId { id: JobId },

    #[error("time quantum must be positive")]
    ZeroQuantum,
}
