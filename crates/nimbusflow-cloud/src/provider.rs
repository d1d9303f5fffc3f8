//! Provider trait definitions
//!
//! The request layer (request signing, field validation, response decoding)
//! implements these traits. The waiters only ever see the narrow query traits;
//! the orchestrator additionally needs the submitter.

use crate::error::Result;
use crate::model::{CreateInstanceRequest, JobStatus, ResourceRecord, Submission};
use async_trait::async_trait;

/// Lookup of a previously submitted job
#[async_trait]
pub trait JobStatusQuery: Send + Sync {
    async fn job_status(&self, job_id: &str) -> Result<JobStatus>;
}

/// Lookup of an instance's current observable state
#[async_trait]
pub trait ResourceDescribeQuery: Send + Sync {
    /// Describe a single instance.
    ///
    /// Implementations return [`CloudError::ResourceNotFound`] when the
    /// provider's result set is empty.
    ///
    /// [`CloudError::ResourceNotFound`]: crate::CloudError::ResourceNotFound
    async fn describe_resource(&self, resource_id: &str) -> Result<ResourceRecord>;
}

/// Mutating instance calls. Each returns as soon as the provider accepts the job.
#[async_trait]
pub trait InstanceSubmitter: Send + Sync {
    /// Submit a create. The returned submission should carry the new instance id.
    async fn submit_create(&self, request: &CreateInstanceRequest) -> Result<Submission>;

    async fn submit_start(&self, resource_id: &str) -> Result<Submission>;

    /// `force` skips the guest shutdown and cuts power
    async fn submit_stop(&self, resource_id: &str, force: bool) -> Result<Submission>;

    async fn submit_restart(&self, resource_id: &str) -> Result<Submission>;

    async fn submit_terminate(&self, resource_id: &str) -> Result<Submission>;
}

/// Everything the orchestrator needs from a provider
pub trait CloudProvider: JobStatusQuery + ResourceDescribeQuery + InstanceSubmitter {}

impl<T> CloudProvider for T where T: JobStatusQuery + ResourceDescribeQuery + InstanceSubmitter {}

