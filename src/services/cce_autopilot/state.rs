//! Response flattening

use super::types::{
    Authentication, ClusterState, ClusterStatus, Configuration, ConfigurationsOverride,
    ContainerNetwork, EniNetwork, Endpoint, ExtendParam, HostNetwork, ServiceNetwork,
};
use crate::flatten::{
    object_list, object_to_list, optional_bool, optional_string, string_list, string_map,
    tags_to_map,
};
use crate::types::JsonValue;

fn string_or_empty(value: &JsonValue, path: &str) -> String {
    optional_string(value, path).unwrap_or_default()
}

fn flatten_status(status: &JsonValue) -> ClusterStatus {
    ClusterStatus {
        phase: optional_string(status, "phase"),
        endpoints: object_list(status, "endpoints", |e| Endpoint {
            url: string_or_empty(e, "url"),
            endpoint_type: string_or_empty(e, "type"),
        }),
    }
}

fn flatten_configurations_override(item: &JsonValue) -> ConfigurationsOverride {
    ConfigurationsOverride {
        name: string_or_empty(item, "name"),
        configurations: object_list(item, "configurations", |c| Configuration {
            name: string_or_empty(c, "name"),
            value: string_or_empty(c, "value"),
        }),
    }
}

/// Flatten a cluster body (the GET response or one list item) into state
pub fn flatten_cluster(id: impl Into<String>, body: &JsonValue) -> ClusterState {
    ClusterState {
        id: id.into(),
        name: optional_string(body, "metadata.name"),
        alias: optional_string(body, "metadata.alias"),
        annotations: string_map(body, "metadata.annotations"),
        category: optional_string(body, "spec.category"),
        cluster_type: optional_string(body, "spec.type"),
        flavor: optional_string(body, "spec.flavor"),
        version: optional_string(body, "spec.version"),
        description: optional_string(body, "spec.description"),
        custom_san: string_list(body, "spec.customSan"),
        enable_autopilot: optional_bool(body, "spec.enableAutopilot"),
        ipv6_enable: optional_bool(body, "spec.ipv6enable"),
        host_network: object_to_list(body, "spec.hostNetwork", |n| HostNetwork {
            vpc: string_or_empty(n, "vpc"),
            subnet: string_or_empty(n, "subnet"),
        }),
        container_network: object_to_list(body, "spec.containerNetwork", |n| ContainerNetwork {
            mode: string_or_empty(n, "mode"),
        }),
        eni_network: object_to_list(body, "spec.eniNetwork", |n| EniNetwork {
            subnets: object_list(n, "subnets", |s| string_or_empty(s, "subnetID")),
        }),
        service_network: object_to_list(body, "spec.serviceNetwork", |n| ServiceNetwork {
            ipv4_cidr: optional_string(n, "IPv4CIDR"),
        }),
        authentication: object_to_list(body, "spec.authentication", |a| Authentication {
            mode: optional_string(a, "mode"),
        }),
        tags: tags_to_map(body, "spec.clusterTags"),
        kube_proxy_mode: optional_string(body, "spec.kubeProxyMode"),
        az: optional_string(body, "spec.az"),
        extend_param: object_to_list(body, "spec.extendParam", |e| ExtendParam {
            enterprise_project_id: optional_string(e, "enterpriseProjectId"),
        }),
        configurations_override: object_list(
            body,
            "spec.configurationsOverride",
            flatten_configurations_override,
        ),
        deletion_protection: optional_bool(body, "spec.deletionProtection"),
        platform_version: optional_string(body, "spec.platformVersion"),
        created_at: optional_string(body, "metadata.creationTimestamp"),
        updated_at: optional_string(body, "metadata.updateTimestamp"),
        status: object_to_list(body, "status", flatten_status),
    }
}
