//! nimbusflow cloud model
//!
//! This crate holds the vocabulary shared by the nimbusflow client: the job and
//! instance records returned by the provider, the traits through which the
//! request layer is reached, and the client configuration.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 nimbusflow-wait                  │
//! │   InstanceOrchestrator → waiters → poller        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                nimbusflow-cloud                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Provider Abstraction             │   │
//! │  │  JobStatusQuery / ResourceDescribeQuery   │   │
//! │  │  InstanceSubmitter                        │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │    Model     │  │    Config    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │       request layer (implements the traits)      │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

// Re-exports
pub use config::{ClientConfig, DEFAULT_OPERATION_TIMEOUT};
pub use error::{CloudError, Result};
pub use model::{
    CreateInstanceRequest, JobRecord, JobStatus, NetworkInfo, ResourceRecord, ResourceStatus,
    Submission,
};
pub use provider::{CloudProvider, InstanceSubmitter, JobStatusQuery, ResourceDescribeQuery};
