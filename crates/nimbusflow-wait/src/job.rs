//! Job completion wait

use crate::error::{Result, WaitError};
use crate::poller::{PollOutcome, WaitSpec, wait_until};
use nimbusflow_cloud::{JobStatus, JobStatusQuery};

/// Wait until `job_id` reaches a terminal status.
///
/// `Successful` ends the wait with `Ok(())`. `Failed` ends it at once with
/// [`WaitError::JobFailed`], even if attempts remain. A failing status query
/// ends it with [`WaitError::Provider`].
pub async fn wait_job<Q>(job_id: &str, querier: &Q, spec: &WaitSpec) -> Result<()>
where
    Q: JobStatusQuery + ?Sized,
{
    tracing::debug!(job_id, "Waiting for job");

    wait_until(spec, || async move {
        match querier.job_status(job_id).await {
            Err(e) => PollOutcome::Failed(WaitError::Provider(e)),
            Ok(JobStatus::Successful) => PollOutcome::Satisfied(()),
            Ok(JobStatus::Failed) => PollOutcome::Failed(WaitError::JobFailed {
                job_id: job_id.to_string(),
            }),
            Ok(JobStatus::Working) => PollOutcome::NotYetSatisfied,
        }
    })
    .await
}
