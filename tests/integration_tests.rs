//! Integration tests using mock HTTP server
//!
//! Tests the full flow: request builder → paged HTTP calls → aggregated JSON
//! → flatten/filter helpers

use pretty_assertions::assert_eq;
use serde_json::json;
use tf_httphelper::filter::JsonFilter;
use tf_httphelper::flatten::{object_list, string_list};
use tf_httphelper::services::cce_autopilot::{ClusterApi, DeleteOptions};
use tf_httphelper::wait::StateChangeConf;
use std::time::Duration;
use tf_httphelper::{Error, HttpHelper, Method, QueryParams, ServiceClient, ServiceClientConfig};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ServiceClient {
    ServiceClient::new(
        ServiceClientConfig::builder()
            .endpoint(format!("{}/", server.uri()))
            .project_id("proj")
            .auth_token("token-1")
            .build(),
    )
    .unwrap()
}

// ============================================================================
// Single Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_users_raw_and_data() {
    let server = MockServer::start().await;
    let body = r#"{"users":[{"id":1,"name":"Alice"},{"id":2,"name":"Bob"},{"id":3,"name":"Carol"}]}"#;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("X-Auth-Token", "token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = client(&server);
    let response = HttpHelper::new(&client).uri("api/users").request().await.unwrap();

    assert_eq!(response.result().unwrap().raw(), body);
    let data = response.data().unwrap();
    let expected: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(serde_json::Value::Object(data), expected);
    assert_eq!(response.pages(), 1);
}

#[tokio::test]
async fn test_unexpected_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = HttpHelper::new(&client)
        .method(Method::POST)
        .uri("api/users")
        .body(json!({"name": "Dave"}))
        .ok_codes([200, 201])
        .request()
        .await
        .unwrap_err();

    match err {
        Error::UnexpectedStatus {
            status,
            expected,
            body,
            ..
        } => {
            assert_eq!(status, 202);
            assert_eq!(expected, vec![200, 201]);
            assert_eq!(body, "queued");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_post_with_body_query_and_placeholders() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/proj/servers/srv-1/action"))
        .and(query_param("dry_run", "true"))
        .and(query_param_is_missing("empty"))
        .and(body_json(json!({"os-start": {}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "j1"})))
        .mount(&server)
        .await;

    let client = client(&server);
    let response = HttpHelper::new(&client)
        .method(Method::POST)
        .uri("v2/{project_id}/servers/{server_id}/action")
        .path_param("server_id", "srv-1")
        .query(QueryParams::new().with("dry_run", true).with("empty", ""))
        .body(json!({"os-start": {}}))
        .request()
        .await
        .unwrap();

    assert_eq!(response.result().unwrap().get("job_id").string_or(""), "j1");
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_offset_pager_infers_page_size() {
    let server = MockServer::start().await;
    let page: Vec<_> = (0..7).map(|i| json!({"id": i})).collect();

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("offset", "7"))
        .and(query_param("limit", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 7}]})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("offset", "14"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": page})))
        .mount(&server)
        .await;

    let client = client(&server);
    let response = HttpHelper::new(&client)
        .uri("v1/items")
        .offset_pager("items", "offset", "limit", 0)
        .request()
        .await
        .unwrap();

    let ids = object_list(&response.value().unwrap(), "items", |v| v["id"].as_i64().unwrap());
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
    assert_eq!(response.pages(), 3);
}

#[tokio::test]
async fn test_explicit_query_beats_pager_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("limit", "1"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": ["a"]})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/items"))
        .and(query_param("limit", "1"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = client(&server);
    let helper = HttpHelper::new(&client)
        .uri("v1/items")
        .query_param("limit", 1)
        .offset_pager("items", "offset", "limit", 2);
    assert!(helper.build_url().unwrap().ends_with("/v1/items?limit=1"));

    let response = helper.request().await.unwrap();
    assert_eq!(string_list(&response.value().unwrap(), "items"), vec!["a"]);
}

#[tokio::test]
async fn test_page_size_pager() {
    let server = MockServer::start().await;

    for (page, items) in [("1", json!([1, 2])), ("2", json!([3])), ("3", json!([]))] {
        Mock::given(method("GET"))
            .and(path("/v1/tags"))
            .and(query_param("page", page))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": items})))
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let response = HttpHelper::new(&client)
        .uri("v1/tags")
        .query_param("page", 1)
        .page_size_pager("tags", "page", "per_page", 2)
        .request()
        .await
        .unwrap();

    assert_eq!(response.value().unwrap(), json!({"tags": [1, 2, 3]}));
}

#[tokio::test]
async fn test_link_pager_resolves_relative_links() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/alarms"))
        .and(query_param_is_missing("start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alarms": [{"id": "al-1"}],
            "links": {"next": "/v3/alarms?start=al-1"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/alarms"))
        .and(query_param("start", "al-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "alarms": [{"id": "al-2"}],
            "links": {}
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let response = HttpHelper::new(&client)
        .uri("v3/alarms")
        .link_pager("alarms", "links.next")
        .request()
        .await
        .unwrap();

    let ids = object_list(&response.value().unwrap(), "alarms", |a| {
        a["id"].as_str().unwrap_or_default().to_string()
    });
    assert_eq!(ids, vec!["al-1", "al-2"]);
    assert_eq!(response.pages(), 2);
}

#[tokio::test]
async fn test_filter_over_aggregated_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/rules"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rules": [{"name": "r1", "level": 1}, {"name": "r2", "level": 3}],
            "page_info": {"next_marker": "m1"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/rules"))
        .and(query_param("marker", "m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rules": [{"name": "r3", "level": 5}],
            "page_info": {}
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let response = HttpHelper::new(&client)
        .uri("v1/rules")
        .marker_pager("rules", "page_info.next_marker", "marker")
        .filter(JsonFilter::new().from("rules").where_("level", ">", 2))
        .request()
        .await
        .unwrap();

    let names = object_list(&response.value().unwrap(), "rules", |r| {
        r["name"].as_str().unwrap_or_default().to_string()
    });
    assert_eq!(names, vec!["r2", "r3"]);
}

// ============================================================================
// Resource Flow Tests
// ============================================================================

#[tokio::test]
async fn test_cluster_delete_flow() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/autopilot/v3/projects/proj/clusters/c-1"))
        .and(query_param("delete_obs", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"jobID": "job-1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/autopilot/v3/projects/proj/jobs/job-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"phase": "Running"}})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/autopilot/v3/projects/proj/jobs/job-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"phase": "Success"}})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let api = ClusterApi::new(&client).job_wait(
        StateChangeConf::default()
            .delay(Duration::ZERO)
            .poll_interval(Duration::from_millis(5)),
    );
    let options = DeleteOptions {
        delete_obs: Some("true".to_string()),
        ..Default::default()
    };

    api.delete_and_wait("c-1", &options).await.unwrap();
}
