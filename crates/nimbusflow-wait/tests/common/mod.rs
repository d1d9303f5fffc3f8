//! Shared fixtures for the orchestration tests
#![allow(dead_code)]

use async_trait::async_trait;
use nimbusflow_cloud::{
    CloudError, CreateInstanceRequest, InstanceSubmitter, JobStatus, JobStatusQuery, NetworkInfo,
    ResourceDescribeQuery, ResourceRecord, ResourceStatus, Result, Submission,
};
use nimbusflow_wait::WaitSpec;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Install a test-writer subscriber once; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// 10 attempts, one second apart
pub fn ten_attempts() -> WaitSpec {
    WaitSpec::new(Duration::from_secs(10), Duration::from_secs(1)).unwrap()
}

/// Every call the orchestrator made, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit(String),
    JobStatus(String),
    Describe(String),
}

/// Fake provider answering from scripts; the last entry of a script repeats
pub struct ScriptedCloud {
    jobs: Mutex<VecDeque<JobStatus>>,
    records: Mutex<VecDeque<ResourceRecord>>,
    created_id: Option<String>,
    submit_error: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedCloud {
    pub fn new(jobs: Vec<JobStatus>, records: Vec<ResourceRecord>) -> Self {
        Self {
            jobs: Mutex::new(jobs.into()),
            records: Mutex::new(records.into()),
            created_id: Some("i-new0001".to_string()),
            submit_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn without_created_id(mut self) -> Self {
        self.created_id = None;
        self
    }

    pub fn rejecting_submissions(mut self, message: impl Into<String>) -> Self {
        self.submit_error = Some(message.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn job_queries(&self) -> usize {
        self.count(|c| matches!(c, Call::JobStatus(_)))
    }

    pub fn describes(&self) -> usize {
        self.count(|c| matches!(c, Call::Describe(_)))
    }

    pub fn probes(&self) -> usize {
        self.job_queries() + self.describes()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn submit(&self, what: String, resource_id: Option<String>) -> Result<Submission> {
        self.record(Call::Submit(what));
        if let Some(message) = &self.submit_error {
            return Err(CloudError::ApiError(message.clone()));
        }
        let submission = Submission::job("j-0001");
        Ok(match resource_id {
            Some(id) => submission.with_resource(id),
            None => submission,
        })
    }
}

fn next_or_last<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
    let mut queue = queue.lock().unwrap();
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

#[async_trait]
impl JobStatusQuery for ScriptedCloud {
    async fn job_status(&self, job_id: &str) -> Result<JobStatus> {
        self.record(Call::JobStatus(job_id.to_string()));
        next_or_last(&self.jobs).ok_or_else(|| CloudError::ApiError("no job script".into()))
    }
}

#[async_trait]
impl ResourceDescribeQuery for ScriptedCloud {
    async fn describe_resource(&self, resource_id: &str) -> Result<ResourceRecord> {
        self.record(Call::Describe(resource_id.to_string()));
        next_or_last(&self.records)
            .ok_or_else(|| CloudError::ResourceNotFound(resource_id.to_string()))
    }
}

#[async_trait]
impl InstanceSubmitter for ScriptedCloud {
    async fn submit_create(&self, request: &CreateInstanceRequest) -> Result<Submission> {
        self.submit(
            format!("create {}", request.image_id),
            self.created_id.clone(),
        )
    }

    async fn submit_start(&self, resource_id: &str) -> Result<Submission> {
        self.submit(format!("start {resource_id}"), None)
    }

    async fn submit_stop(&self, resource_id: &str, force: bool) -> Result<Submission> {
        self.submit(format!("stop {resource_id} force={force}"), None)
    }

    async fn submit_restart(&self, resource_id: &str) -> Result<Submission> {
        self.submit(format!("restart {resource_id}"), None)
    }

    async fn submit_terminate(&self, resource_id: &str) -> Result<Submission> {
        self.submit(format!("terminate {resource_id}"), None)
    }
}

pub fn instance(status: ResourceStatus) -> ResourceRecord {
    ResourceRecord::new("i-new0001", status)
}

pub fn with_ip(record: ResourceRecord, ip: &str) -> ResourceRecord {
    record.with_network(NetworkInfo::from_private_addresses([ip]).unwrap())
}
