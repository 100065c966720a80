//! Cluster operations

use super::body::{build_create_body, build_eip_body, build_tags_body, build_update_body};
use super::state::flatten_cluster;
use super::types::{ClusterSpec, ClusterState, ClusterUpdate, DeleteOptions, TagAction};
use crate::client::ServiceClient;
use crate::error::{Error, Result};
use crate::flatten::object_list;
use crate::httphelper::HttpHelper;
use crate::json::search_str;
use crate::types::{JsonValue, Method};
use crate::wait::{RefreshResult, StateChangeConf, StatusFieldRefresh};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Cluster collection
pub const CLUSTERS_URI: &str = "autopilot/v3/projects/{project_id}/clusters";

/// One cluster
pub const CLUSTER_URI: &str = "autopilot/v3/projects/{project_id}/clusters/{cluster_id}";

/// Asynchronous job
pub const JOB_URI: &str = "autopilot/v3/projects/{project_id}/jobs/{job_id}";

/// Tag batch action
pub const TAGS_URI: &str = "autopilot/v3/projects/{project_id}/clusters/{cluster_id}/tags/{action}";

/// Master node EIP binding
pub const MASTER_EIP_URI: &str = "autopilot/v3/projects/{project_id}/clusters/{cluster_id}/mastereip";

/// Identifiers returned by an accepted create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCluster {
    pub id: String,
    pub job_id: String,
}

fn required(body: &JsonValue, path: &str, what: &str, action: &str) -> Result<String> {
    search_str(body, path)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::json_path(format!(
                "error {action} CCE autopilot cluster: {what} is not found in API response"
            ))
        })
}

/// CCE Autopilot cluster API
#[derive(Debug, Clone)]
pub struct ClusterApi<'a> {
    client: &'a ServiceClient,
    job_wait: StateChangeConf,
}

impl<'a> ClusterApi<'a> {
    /// Create the API over a service client
    pub fn new(client: &'a ServiceClient) -> Self {
        Self {
            client,
            job_wait: StateChangeConf::default(),
        }
    }

    /// Polling settings used when waiting on jobs
    #[must_use]
    pub fn job_wait(mut self, conf: StateChangeConf) -> Self {
        self.job_wait = conf;
        self
    }

    fn cluster_request(&self, cluster_id: &str) -> HttpHelper<'a> {
        HttpHelper::new(self.client)
            .uri(CLUSTER_URI)
            .path_param("cluster_id", cluster_id)
    }

    /// Submit a create request. The cluster is usable once its job completes.
    pub async fn create(&self, spec: &ClusterSpec) -> Result<CreatedCluster> {
        let body = HttpHelper::new(self.client)
            .method(Method::POST)
            .uri(CLUSTERS_URI)
            .body(build_create_body(spec))
            .request()
            .await?
            .value()?;

        let created = CreatedCluster {
            id: required(&body, "metadata.uid", "ID", "creating")?,
            job_id: required(&body, "status.jobID", "jobID", "creating")?,
        };
        info!(
            "Submitted cluster '{}' as '{}' (job '{}')",
            spec.name, created.id, created.job_id
        );
        Ok(created)
    }

    /// Create a cluster, wait for its job and read it back
    pub async fn create_and_wait(&self, spec: &ClusterSpec) -> Result<ClusterState> {
        let created = self.create(spec).await?;
        self.wait_for_job(&created.job_id).await?;
        self.get(&created.id).await
    }

    /// Poll a job until its phase is `Success`. `Failed` ends the wait with an error.
    pub async fn wait_for_job(&self, job_id: &str) -> Result<RefreshResult> {
        let refresh = StatusFieldRefresh::new(self.client, JOB_URI, "status.phase")
            .path_param("job_id", job_id)
            .success(["Success"])
            .failure(["Failed"]);
        self.job_wait.wait_for_state(&refresh).await
    }

    /// Read one cluster
    pub async fn get(&self, cluster_id: &str) -> Result<ClusterState> {
        let body = self.cluster_request(cluster_id).request().await?.value()?;
        Ok(flatten_cluster(cluster_id, &body))
    }

    /// List all clusters of the project, following `metadata.continue`
    pub async fn list(&self) -> Result<Vec<ClusterState>> {
        let body = HttpHelper::new(self.client)
            .uri(CLUSTERS_URI)
            .marker_pager("items", "metadata.continue", "continue")
            .request()
            .await?
            .value()?;

        let clusters = object_list(&body, "items", |item| {
            let id = search_str(item, "metadata.uid").unwrap_or_default();
            flatten_cluster(id, item)
        });
        debug!("Listed {} clusters", clusters.len());
        Ok(clusters)
    }

    /// Apply an in-place update. An empty update sends nothing.
    pub async fn update(&self, cluster_id: &str, update: &ClusterUpdate) -> Result<()> {
        if update.is_empty() {
            debug!("No changes for cluster '{cluster_id}'");
            return Ok(());
        }

        self.cluster_request(cluster_id)
            .method(Method::PUT)
            .body(build_update_body(update))
            .request()
            .await?;
        Ok(())
    }

    /// Add or remove tags in one batch
    pub async fn update_tags(
        &self,
        cluster_id: &str,
        action: TagAction,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        HttpHelper::new(self.client)
            .method(Method::POST)
            .uri(TAGS_URI)
            .path_param("cluster_id", cluster_id)
            .path_param("action", action.as_str())
            .body(build_tags_body(action, tags))
            .ok_code(204)
            .request()
            .await?;
        Ok(())
    }

    /// Replace the cluster tags: drop `old`, then add `new`
    pub async fn replace_tags(
        &self,
        cluster_id: &str,
        old: &BTreeMap<String, String>,
        new: &BTreeMap<String, String>,
    ) -> Result<()> {
        if !old.is_empty() {
            self.update_tags(cluster_id, TagAction::Delete, old).await?;
        }
        if !new.is_empty() {
            self.update_tags(cluster_id, TagAction::Create, new).await?;
        }
        Ok(())
    }

    /// Bind the master EIP, or unbind it with `None`
    pub async fn bind_eip(&self, cluster_id: &str, eip_id: Option<&str>) -> Result<()> {
        HttpHelper::new(self.client)
            .method(Method::PUT)
            .uri(MASTER_EIP_URI)
            .path_param("cluster_id", cluster_id)
            .body(build_eip_body(eip_id))
            .request()
            .await?;
        Ok(())
    }

    /// Submit a delete request and return the job ID
    pub async fn delete(&self, cluster_id: &str, options: &DeleteOptions) -> Result<String> {
        let flags = [
            ("delete_efs", &options.delete_efs),
            ("delete_eni", &options.delete_eni),
            ("delete_net", &options.delete_net),
            ("delete_obs", &options.delete_obs),
            ("delete_sfs30", &options.delete_sfs30),
            ("lts_reclaim_policy", &options.lts_reclaim_policy),
        ];

        let mut request = self.cluster_request(cluster_id).method(Method::DELETE);
        for (key, value) in flags {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                request = request.query_param(key, value);
            }
        }

        let body = request.request().await?.value()?;
        let job_id = required(&body, "status.jobID", "jobID", "deleting")?;
        info!("Deleting cluster '{cluster_id}' (job '{job_id}')");
        Ok(job_id)
    }

    /// Delete a cluster and wait for the job.
    ///
    /// A cluster that is already gone counts as deleted.
    pub async fn delete_and_wait(&self, cluster_id: &str, options: &DeleteOptions) -> Result<()> {
        let job_id = match self.delete(cluster_id, options).await {
            Ok(job_id) => job_id,
            Err(e) if e.is_not_found() => {
                debug!("Cluster '{cluster_id}' already deleted");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.wait_for_job(&job_id).await?;
        Ok(())
    }
}
