//! Scripted query fakes for the waiter unit tests

use async_trait::async_trait;
use nimbusflow_cloud::{
    CloudError, JobStatus, JobStatusQuery, ResourceDescribeQuery, ResourceRecord, Result,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays a script of answers, then repeats the last one forever.
/// `Err(msg)` entries become `CloudError::ApiError(msg)`.
struct Script<T> {
    steps: Mutex<VecDeque<std::result::Result<T, String>>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(steps: Vec<std::result::Result<T, String>>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut steps = self.steps.lock().unwrap();
        let step = if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps.front().cloned().unwrap()
        };
        step.map_err(CloudError::ApiError)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub struct ScriptedJobs(Script<JobStatus>);

impl ScriptedJobs {
    pub fn new(steps: Vec<std::result::Result<JobStatus, String>>) -> Self {
        Self(Script::new(steps))
    }

    pub fn calls(&self) -> usize {
        self.0.calls()
    }
}

#[async_trait]
impl JobStatusQuery for ScriptedJobs {
    async fn job_status(&self, _job_id: &str) -> Result<JobStatus> {
        self.0.next()
    }
}

pub struct ScriptedResources(Script<ResourceRecord>);

impl ScriptedResources {
    pub fn new(steps: Vec<std::result::Result<ResourceRecord, String>>) -> Self {
        Self(Script::new(steps))
    }

    pub fn calls(&self) -> usize {
        self.0.calls()
    }
}

#[async_trait]
impl ResourceDescribeQuery for ScriptedResources {
    async fn describe_resource(&self, _resource_id: &str) -> Result<ResourceRecord> {
        self.0.next()
    }
}
