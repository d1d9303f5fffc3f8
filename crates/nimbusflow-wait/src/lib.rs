//! nimbusflow convergence layer
//!
//! Provider calls that change an instance only enqueue a job. This crate waits
//! for those jobs to take effect:
//!
//! - [`poller::wait_until`]: bounded probe/sleep loop, `floor(timeout / interval)` attempts
//! - [`job::wait_job`]: until a job is `Successful` (or fails)
//! - [`status::wait_status`]: until an instance reports a given status
//! - [`network::wait_network`]: until an instance has a private address
//! - [`InstanceOrchestrator`]: run / start / stop / restart / terminate pipelines
//!
//! # Example
//!
//! ```ignore
//! use nimbusflow_cloud::{ClientConfig, CreateInstanceRequest};
//! use nimbusflow_wait::{InstanceOrchestrator, WaitSpec};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::from_env()?;
//! let orchestrator = InstanceOrchestrator::new(Arc::new(provider), WaitSpec::try_from(&config)?);
//!
//! let request = CreateInstanceRequest::new("centos7x64", "c1m1").with_vxnet("vxnet-0");
//! let instance = orchestrator.run(&request).await?;
//! println!("{} is up at {:?}", instance.id, instance.private_ip());
//! ```

pub mod error;
pub mod job;
pub mod network;
pub mod orchestrator;
pub mod poller;
pub mod status;

#[cfg(test)]
mod testing;

pub use error::{Result, WaitError};
pub use job::wait_job;
pub use network::wait_network;
pub use orchestrator::InstanceOrchestrator;
pub use poller::{PollOutcome, TimeoutExceeded, WaitSpec, WaitSpecError, wait_until};
pub use status::wait_status;
