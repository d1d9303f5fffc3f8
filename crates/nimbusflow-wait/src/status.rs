//! Instance status wait

use crate::error::{Result, WaitError};
use crate::poller::{PollOutcome, WaitSpec, wait_until};
use nimbusflow_cloud::{ResourceDescribeQuery, ResourceRecord, ResourceStatus};

/// Wait until the instance reports `target` and return the matching record.
///
/// Any other status keeps the wait going, including ones that will never
/// turn into `target` (an instance that went `ceased` while we wait for
/// `running` is only noticed at the timeout). A failing describe call ends
/// the wait with [`WaitError::Provider`].
pub async fn wait_status<Q>(
    resource_id: &str,
    target: &ResourceStatus,
    querier: &Q,
    spec: &WaitSpec,
) -> Result<ResourceRecord>
where
    Q: ResourceDescribeQuery + ?Sized,
{
    tracing::debug!(resource_id, %target, "Waiting for instance status");

    wait_until(spec, || async move {
        match querier.describe_resource(resource_id).await {
            Err(e) => PollOutcome::Failed(WaitError::Provider(e)),
            Ok(record) if record.status == *target => PollOutcome::Satisfied(record),
            Ok(record) => {
                tracing::trace!(resource_id, status = %record.status, "Instance not in target status");
                PollOutcome::NotYetSatisfied
            }
        }
    })
    .await
}
