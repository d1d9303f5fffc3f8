//! Wait and orchestration error types

use crate::poller::TimeoutExceeded;
use nimbusflow_cloud::CloudError;
use thiserror::Error;

/// Errors returned by the waiters and the orchestrator.
///
/// The three variants are disjoint: the provider could not be reached or
/// refused a call, the provider ran the job and it failed, or we stopped
/// waiting while the operation may still be converging.
#[derive(Error, Debug)]
pub enum WaitError {
    #[error(transparent)]
    Provider(#[from] CloudError),

    #[error("Job {job_id} failed")]
    JobFailed { job_id: String },

    #[error(transparent)]
    Timeout(#[from] TimeoutExceeded),
}

impl WaitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout(_))
    }

    pub fn is_job_failed(&self) -> bool {
        matches!(self, WaitError::JobFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, WaitError>;
