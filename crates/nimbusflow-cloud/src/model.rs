//! Job and instance records
//!
//! Every record here is a snapshot decoded from one provider response. Nothing
//! is cached; waiters fetch a fresh record on each attempt.

use crate::error::{CloudError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Status of a provider job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted or in progress
    #[serde(alias = "pending")]
    Working,
    /// Job finished and its effect was applied
    Successful,
    /// Job was rejected or aborted
    #[serde(alias = "done with failure")]
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Working)
    }
}

impl FromStr for JobStatus {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" | "working" => Ok(JobStatus::Working),
            "successful" => Ok(JobStatus::Successful),
            "failed" | "done with failure" => Ok(JobStatus::Failed),
            other => Err(CloudError::InvalidResponse(format!(
                "unknown job status: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Working => write!(f, "working"),
            JobStatus::Successful => write!(f, "successful"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A submitted job as seen by one status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub status: JobStatus,
}

impl JobRecord {
    pub fn new(id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// Instance status as reported by the provider.
///
/// The set of values is open. Only the well-known constants below are compared
/// against; anything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceStatus(Cow<'static, str>);

impl ResourceStatus {
    pub const PENDING: Self = Self(Cow::Borrowed("pending"));
    pub const RUNNING: Self = Self(Cow::Borrowed("running"));
    pub const STOPPED: Self = Self(Cow::Borrowed("stopped"));
    pub const SUSPENDED: Self = Self(Cow::Borrowed("suspended"));
    pub const TERMINATED: Self = Self(Cow::Borrowed("terminated"));
    pub const CEASED: Self = Self(Cow::Borrowed("ceased"));

    pub fn new(status: impl Into<String>) -> Self {
        Self(Cow::Owned(status.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceStatus {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ResourceStatus {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Network attachment of an instance.
///
/// Always holds at least one private address. Decoding a document with an
/// empty address list fails; use [`ResourceRecord`] decoding, which treats an
/// empty list as "not attached yet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNetworkInfo")]
pub struct NetworkInfo {
    /// Private addresses, one per attached vxnet
    private_addresses: Vec<String>,

    /// Elastic IP, if one is bound
    public_address: Option<String>,
}

/// Wire shape of [`NetworkInfo`], before the address check
#[derive(Debug, Deserialize)]
struct RawNetworkInfo {
    #[serde(default)]
    private_addresses: Vec<String>,
    #[serde(default)]
    public_address: Option<String>,
}

impl TryFrom<RawNetworkInfo> for NetworkInfo {
    type Error = CloudError;

    fn try_from(raw: RawNetworkInfo) -> Result<Self> {
        let network = Self::from_private_addresses(raw.private_addresses).ok_or_else(|| {
            CloudError::InvalidResponse("network info without a private address".into())
        })?;
        Ok(match raw.public_address {
            Some(address) if !address.is_empty() => network.with_public_address(address),
            _ => network,
        })
    }
}

impl NetworkInfo {
    /// Build network info from the addresses found in a describe response.
    ///
    /// Returns `None` when no private address has been assigned yet, which is
    /// how a freshly booted instance looks before its NIC is attached.
    pub fn from_private_addresses<I, S>(addresses: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let private_addresses: Vec<String> = addresses
            .into_iter()
            .map(Into::<String>::into)
            .filter(|a| !a.is_empty())
            .collect();

        if private_addresses.is_empty() {
            None
        } else {
            Some(Self {
                private_addresses,
                public_address: None,
            })
        }
    }

    pub fn with_public_address(mut self, address: impl Into<String>) -> Self {
        self.public_address = Some(address.into());
        self
    }

    pub fn private_addresses(&self) -> &[String] {
        &self.private_addresses
    }

    pub fn public_address(&self) -> Option<&str> {
        self.public_address.as_deref()
    }

    /// First private address
    pub fn primary_address(&self) -> Option<&str> {
        self.private_addresses.first().map(String::as_str)
    }
}

/// Decodes `network`, mapping a missing or address-less attachment to `None`
fn deserialize_network<'de, D>(deserializer: D) -> std::result::Result<Option<NetworkInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<RawNetworkInfo>::deserialize(deserializer)?;
    Ok(raw.and_then(|raw| NetworkInfo::try_from(raw).ok()))
}

/// An instance as seen by one describe call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,

    pub name: Option<String>,

    pub status: ResourceStatus,

    /// Present once at least one private address is attached
    #[serde(default, deserialize_with = "deserialize_network")]
    pub network: Option<NetworkInfo>,

    /// When the provider last changed `status`
    pub status_time: Option<DateTime<Utc>>,
}

impl ResourceRecord {
    pub fn new(id: impl Into<String>, status: impl Into<ResourceStatus>) -> Self {
        Self {
            id: id.into(),
            name: None,
            status: status.into(),
            network: None,
            status_time: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_network(mut self, network: NetworkInfo) -> Self {
        self.network = Some(network);
        self
    }

    pub fn with_status_time(mut self, time: DateTime<Utc>) -> Self {
        self.status_time = Some(time);
        self
    }

    pub fn private_ip(&self) -> Option<&str> {
        self.network.as_ref().and_then(NetworkInfo::primary_address)
    }

    pub fn is_running(&self) -> bool {
        self.status == ResourceStatus::RUNNING
    }
}

/// Result of a mutating call: the job to watch and, for creates, the new instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub job_id: String,
    pub resource_id: Option<String>,
}

impl Submission {
    pub fn job(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            resource_id: None,
        }
    }

    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }
}

/// Parameters for creating an instance, forwarded as-is to the request layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstanceRequest {
    pub image_id: String,
    pub instance_type: String,
    pub instance_name: Option<String>,
    #[serde(default)]
    pub vxnets: Vec<String>,
    pub login_keypair: Option<String>,
}

impl CreateInstanceRequest {
    pub fn new(image_id: impl Into<String>, instance_type: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            instance_type: instance_type.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.instance_name = Some(name.into());
        self
    }

    pub fn with_vxnet(mut self, vxnet: impl Into<String>) -> Self {
        self.vxnets.push(vxnet.into());
        self
    }

    pub fn with_login_keypair(mut self, keypair: impl Into<String>) -> Self {
        self.login_keypair = Some(keypair.into());
        self
    }
}
