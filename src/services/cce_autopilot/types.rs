//! Cluster input and state types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Nested Blocks
// ============================================================================

/// VPC and subnet the control plane lives in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostNetwork {
    pub vpc: String,
    pub subnet: String,
}

/// Container network model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerNetwork {
    pub mode: String,
}

/// ENI subnets used for pods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EniNetwork {
    pub subnets: Vec<String>,
}

/// Service CIDR
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceNetwork {
    pub ipv4_cidr: Option<String>,
}

/// Authentication mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authentication {
    pub mode: Option<String>,
}

/// Extended parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendParam {
    pub enterprise_project_id: Option<String>,
}

/// One overridden component configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub value: String,
}

/// Configuration overrides for one component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationsOverride {
    pub name: String,
    pub configurations: Vec<Configuration>,
}

/// Access endpoint of a running cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub url: String,
    #[serde(rename = "type")]
    pub endpoint_type: String,
}

/// Runtime status block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStatus {
    pub phase: Option<String>,
    pub endpoints: Vec<Endpoint>,
}

// ============================================================================
// Cluster Input
// ============================================================================

/// Desired cluster, as sent on create.
///
/// Empty strings and empty collections are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSpec {
    pub name: String,
    pub flavor: String,
    pub alias: Option<String>,
    pub annotations: BTreeMap<String, String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub cluster_type: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub custom_san: Vec<String>,
    pub enable_snat: bool,
    pub enable_swr_image_access: bool,
    pub enable_autopilot: bool,
    pub ipv6_enable: bool,
    pub host_network: Option<HostNetwork>,
    pub container_network: Option<ContainerNetwork>,
    pub eni_network: Option<EniNetwork>,
    pub service_network: Option<ServiceNetwork>,
    pub authentication: Option<Authentication>,
    pub tags: BTreeMap<String, String>,
    pub kube_proxy_mode: Option<String>,
    pub extend_param: Option<ExtendParam>,
    pub configurations_override: Vec<ConfigurationsOverride>,
    pub delete_protection: bool,
}

/// Changes applied with an in-place update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterUpdate {
    pub alias: Option<String>,
    pub description: Option<String>,
    pub custom_san: Option<Vec<String>>,
    pub eni_network: Option<EniNetwork>,
}

impl ClusterUpdate {
    /// Whether the update carries no change at all
    pub fn is_empty(&self) -> bool {
        self.alias.is_none()
            && self.description.is_none()
            && self.custom_san.is_none()
            && self.eni_network.is_none()
    }
}

/// Query flags accepted on delete. Unset flags are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteOptions {
    pub delete_efs: Option<String>,
    pub delete_eni: Option<String>,
    pub delete_net: Option<String>,
    pub delete_obs: Option<String>,
    pub delete_sfs30: Option<String>,
    pub lts_reclaim_policy: Option<String>,
}

/// Direction of a tag batch action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    Create,
    Delete,
}

impl TagAction {
    /// Path segment of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            TagAction::Create => "create",
            TagAction::Delete => "delete",
        }
    }
}

// ============================================================================
// Cluster State
// ============================================================================

/// Cluster as read back from the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterState {
    pub id: String,
    pub name: Option<String>,
    pub alias: Option<String>,
    pub annotations: BTreeMap<String, String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub cluster_type: Option<String>,
    pub flavor: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub custom_san: Vec<String>,
    pub enable_autopilot: Option<bool>,
    pub ipv6_enable: Option<bool>,
    pub host_network: Vec<HostNetwork>,
    pub container_network: Vec<ContainerNetwork>,
    pub eni_network: Vec<EniNetwork>,
    pub service_network: Vec<ServiceNetwork>,
    pub authentication: Vec<Authentication>,
    pub tags: BTreeMap<String, String>,
    pub kube_proxy_mode: Option<String>,
    pub az: Option<String>,
    pub extend_param: Vec<ExtendParam>,
    pub configurations_override: Vec<ConfigurationsOverride>,
    pub deletion_protection: Option<bool>,
    pub platform_version: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub status: Vec<ClusterStatus>,
}
