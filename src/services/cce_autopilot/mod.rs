//! CCE Autopilot clusters
//!
//! Create and delete are asynchronous: the API answers with a job ID whose
//! `status.phase` is polled until `Success` (or `Failed`). Reads flatten the
//! cluster body into [`ClusterState`], with nested blocks as lists of zero
//! or one element.

mod api;
mod body;
mod state;
mod types;

pub use api::{
    ClusterApi, CreatedCluster, CLUSTERS_URI, CLUSTER_URI, JOB_URI, MASTER_EIP_URI, TAGS_URI,
};
pub use body::{build_create_body, build_eip_body, build_tags_body, build_update_body, tags_body};
pub use state::flatten_cluster;
pub use types::{
    Authentication, ClusterSpec, ClusterState, ClusterStatus, ClusterUpdate, Configuration,
    ConfigurationsOverride, ContainerNetwork, DeleteOptions, EniNetwork, Endpoint, ExtendParam,
    HostNetwork, ServiceNetwork, TagAction,
};
