//! Network readiness wait

use crate::error::{Result, WaitError};
use crate::poller::{PollOutcome, WaitSpec, wait_until};
use nimbusflow_cloud::{ResourceDescribeQuery, ResourceRecord};

/// Wait until the instance has at least one private address attached.
pub async fn wait_network<Q>(resource_id: &str, querier: &Q, spec: &WaitSpec) -> Result<ResourceRecord>
where
    Q: ResourceDescribeQuery + ?Sized,
{
    tracing::debug!(resource_id, "Waiting for instance network");

    wait_until(spec, || async move {
        match querier.describe_resource(resource_id).await {
            Err(e) => PollOutcome::Failed(WaitError::Provider(e)),
            Ok(record) if record.private_ip().is_some() => PollOutcome::Satisfied(record),
            Ok(_) => PollOutcome::NotYetSatisfied,
        }
    })
    .await
}
