//! Request bodies
//!
//! Bodies are assembled as JSON trees with unset values as `null`, then
//! stripped with [`remove_nil`] before sending.

use super::types::{ClusterSpec, ClusterUpdate, ConfigurationsOverride, EniNetwork, TagAction};
use crate::json::remove_nil;
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use std::collections::BTreeMap;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn non_empty_list(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

fn non_empty_map(values: &BTreeMap<String, String>) -> Option<&BTreeMap<String, String>> {
    (!values.is_empty()).then_some(values)
}

fn eni_network_body(eni: &EniNetwork) -> JsonValue {
    let subnets: Vec<JsonValue> = eni
        .subnets
        .iter()
        .map(|id| json!({ "subnetID": id }))
        .collect();
    json!({ "subnets": subnets })
}

fn configurations_override_body(overrides: &[ConfigurationsOverride]) -> Option<JsonValue> {
    if overrides.is_empty() {
        return None;
    }

    let items = overrides
        .iter()
        .map(|o| {
            let configurations = (!o.configurations.is_empty()).then(|| {
                o.configurations
                    .iter()
                    .map(|c| json!({ "name": c.name, "value": c.value }))
                    .collect::<Vec<_>>()
            });
            json!({ "name": o.name, "configurations": configurations })
        })
        .collect();
    Some(JsonValue::Array(items))
}

/// Resource tags as the `[{key, value}]` list the API expects
pub fn tags_body(tags: &BTreeMap<String, String>) -> JsonValue {
    tags.iter()
        .map(|(k, v)| json!({ "key": k, "value": v }))
        .collect()
}

/// Create request body
pub fn build_create_body(spec: &ClusterSpec) -> JsonValue {
    let body = json!({
        "kind": "Cluster",
        "apiVersion": "v3",
        "metadata": {
            "name": spec.name,
            "alias": non_empty(&spec.alias),
            "annotations": non_empty_map(&spec.annotations),
        },
        "spec": {
            "category": non_empty(&spec.category),
            "type": non_empty(&spec.cluster_type),
            "flavor": spec.flavor,
            "version": non_empty(&spec.version),
            "description": non_empty(&spec.description),
            "customSan": non_empty_list(&spec.custom_san),
            "enableSnat": spec.enable_snat,
            "enableSWRImageAccess": spec.enable_swr_image_access,
            "enableAutopilot": spec.enable_autopilot,
            "ipv6enable": spec.ipv6_enable,
            "hostNetwork": spec.host_network.as_ref().map(|n| json!({
                "vpc": n.vpc,
                "subnet": n.subnet,
            })),
            "containerNetwork": spec.container_network.as_ref().map(|n| json!({ "mode": n.mode })),
            "eniNetwork": spec.eni_network.as_ref().map(eni_network_body),
            "serviceNetwork": spec.service_network.as_ref().map(|n| json!({ "IPv4CIDR": n.ipv4_cidr })),
            "authentication": spec.authentication.as_ref().map(|a| json!({ "mode": a.mode })),
            "clusterTags": tags_body(&spec.tags),
            "kubeProxyMode": non_empty(&spec.kube_proxy_mode),
            "extendParam": spec.extend_param.as_ref().map(|e| json!({
                "enterpriseProjectId": e.enterprise_project_id,
            })),
            "configurationsOverride": configurations_override_body(&spec.configurations_override),
            "deleteProtection": spec.delete_protection,
        },
    });

    remove_nil(body)
}

/// In-place update body holding only the changed fields
pub fn build_update_body(update: &ClusterUpdate) -> JsonValue {
    let mut body = JsonObject::new();

    if update.alias.is_some() {
        body.insert(
            "metadata".to_string(),
            json!({ "alias": non_empty(&update.alias) }),
        );
    }

    let mut spec = JsonObject::new();
    if let Some(description) = &update.description {
        spec.insert("description".to_string(), json!(description));
    }
    if let Some(san) = &update.custom_san {
        spec.insert("customSan".to_string(), json!(san));
    }
    if let Some(eni) = &update.eni_network {
        spec.insert("eniNetwork".to_string(), eni_network_body(eni));
    }
    if !spec.is_empty() {
        body.insert("spec".to_string(), JsonValue::Object(spec));
    }

    remove_nil(JsonValue::Object(body))
}

/// Master EIP body: bind `eip_id`, or unbind when `None`
pub fn build_eip_body(eip_id: Option<&str>) -> JsonValue {
    match eip_id.filter(|id| !id.is_empty()) {
        Some(id) => json!({ "spec": { "action": "bind", "spec": { "id": id } } }),
        None => json!({ "spec": { "action": "unbind" } }),
    }
}

/// Tag batch body. Deletion only sends the keys.
pub fn build_tags_body(action: TagAction, tags: &BTreeMap<String, String>) -> JsonValue {
    let list = match action {
        TagAction::Create => tags_body(tags),
        TagAction::Delete => tags.keys().map(|k| json!({ "key": k })).collect(),
    };
    json!({ "tags": list })
}
