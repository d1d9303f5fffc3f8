//! Instance lifecycle orchestration
//!
//! Each operation is a fixed pipeline: submit the job, wait for the job, wait
//! for the instance to reach the expected status, and (for `run` only) wait
//! for its network. Stages run one after another; the first error is returned
//! as-is and nothing after it runs. Nothing is rolled back: a `run` whose
//! network wait times out leaves the instance in place for the caller to
//! inspect or terminate.

use crate::error::Result;
use crate::job::wait_job;
use crate::network::wait_network;
use crate::poller::WaitSpec;
use crate::status::wait_status;
use nimbusflow_cloud::{
    CloudError, CloudProvider, CreateInstanceRequest, ResourceRecord, ResourceStatus, Submission,
};
use std::sync::Arc;

/// Drives instance operations to completion against a provider
pub struct InstanceOrchestrator<P: ?Sized> {
    provider: Arc<P>,
    spec: WaitSpec,
}

impl<P: ?Sized> Clone for InstanceOrchestrator<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            spec: self.spec,
        }
    }
}

impl<P> InstanceOrchestrator<P>
where
    P: CloudProvider + ?Sized,
{
    /// `spec` applies to every wait stage unless overridden per call
    pub fn new(provider: Arc<P>, spec: WaitSpec) -> Self {
        Self { provider, spec }
    }

    /// A copy of this orchestrator that waits with `spec` instead
    pub fn with_wait_spec(&self, spec: WaitSpec) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            spec,
        }
    }

    pub fn wait_spec(&self) -> &WaitSpec {
        &self.spec
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Create an instance and wait until it is running with a network attached
    pub async fn run(&self, request: &CreateInstanceRequest) -> Result<ResourceRecord> {
        tracing::info!(image = %request.image_id, instance_type = %request.instance_type, "Creating instance");

        let submission = self.provider.submit_create(request).await?;
        let resource_id = submission.resource_id.clone().ok_or_else(|| {
            CloudError::InvalidResponse(format!(
                "create job {} returned no instance id",
                submission.job_id
            ))
        })?;

        wait_job(&submission.job_id, self.provider.as_ref(), &self.spec).await?;
        wait_status(
            &resource_id,
            &ResourceStatus::RUNNING,
            self.provider.as_ref(),
            &self.spec,
        )
        .await?;
        let record = wait_network(&resource_id, self.provider.as_ref(), &self.spec).await?;

        tracing::info!(
            resource_id = %record.id,
            network = ?record.network,
            "Instance is running"
        );
        Ok(record)
    }

    pub async fn start(&self, resource_id: &str) -> Result<ResourceRecord> {
        tracing::info!(resource_id, "Starting instance");
        let submission = self.provider.submit_start(resource_id).await?;
        self.converge(resource_id, submission, &ResourceStatus::RUNNING)
            .await
    }

    /// Stop an instance; `force` cuts power instead of a guest shutdown
    pub async fn stop(&self, resource_id: &str, force: bool) -> Result<ResourceRecord> {
        tracing::info!(resource_id, force, "Stopping instance");
        let submission = self.provider.submit_stop(resource_id, force).await?;
        self.converge(resource_id, submission, &ResourceStatus::STOPPED)
            .await
    }

    pub async fn restart(&self, resource_id: &str) -> Result<ResourceRecord> {
        tracing::info!(resource_id, "Restarting instance");
        let submission = self.provider.submit_restart(resource_id).await?;
        self.converge(resource_id, submission, &ResourceStatus::RUNNING)
            .await
    }

    pub async fn terminate(&self, resource_id: &str) -> Result<ResourceRecord> {
        tracing::info!(resource_id, "Terminating instance");
        let submission = self.provider.submit_terminate(resource_id).await?;
        self.converge(resource_id, submission, &ResourceStatus::TERMINATED)
            .await
    }

    /// Describe an instance once, without waiting
    pub async fn describe(&self, resource_id: &str) -> Result<ResourceRecord> {
        Ok(self.provider.describe_resource(resource_id).await?)
    }

    /// Wait for an instance to reach `target` using this orchestrator's spec
    pub async fn wait_status(
        &self,
        resource_id: &str,
        target: &ResourceStatus,
    ) -> Result<ResourceRecord> {
        wait_status(resource_id, target, self.provider.as_ref(), &self.spec).await
    }

    async fn converge(
        &self,
        resource_id: &str,
        submission: Submission,
        target: &ResourceStatus,
    ) -> Result<ResourceRecord> {
        wait_job(&submission.job_id, self.provider.as_ref(), &self.spec).await?;
        let record = wait_status(resource_id, target, self.provider.as_ref(), &self.spec).await?;

        tracing::info!(resource_id, status = %record.status, "Instance converged");
        Ok(record)
    }
}
