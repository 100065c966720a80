//! Tests for pagination module

use super::*;
use crate::query::{encode, QueryValue};
use serde_json::json;
use url::Url;

fn page(url: &str, body: serde_json::Value) -> PageResult {
    PageResult::new(Url::parse(url).unwrap(), body)
}

fn items(n: usize) -> serde_json::Value {
    json!({ "items": (0..n).map(|i| json!({"id": i})).collect::<Vec<_>>() })
}

// ============================================================================
// PageResult / URL Helper Tests
// ============================================================================

#[test]
fn test_page_result_parse() {
    let page = PageResult::parse("https://x/v1/items?limit=5", r#"{"items":[1]}"#).unwrap();
    assert_eq!(page.query_value("limit"), Some("5".to_string()));
    assert_eq!(page.body, json!({"items": [1]}));

    let empty = PageResult::parse("https://x/v1/items", "").unwrap();
    assert!(empty.body.is_null());

    assert!(PageResult::parse("not a url", "{}").is_err());
}

#[test]
fn test_with_query_value_replaces_existing() {
    let url = Url::parse("https://x/v1/items?marker=a&name=b&marker=c").unwrap();
    let next = with_query_value(&url, "marker", "z");
    assert_eq!(next.as_str(), "https://x/v1/items?name=b&marker=z");
}

// ============================================================================
// Emptiness Tests
// ============================================================================

#[test]
fn test_empty_page_is_empty_for_every_pager() {
    let body = json!({"items": [], "page_info": {"next_marker": "abc"}, "next": "https://x/2"});
    let p = page("https://x/v1/items", body);

    let pagers: Vec<Box<dyn Pager>> = vec![
        Box::new(OffsetPager::new("items", "offset", "limit", 10)),
        Box::new(MarkerPager::new("items", "page_info.next_marker", "marker")),
        Box::new(LinkPager::new("items", "next")),
        Box::new(PageSizePager::new("items", "page", "per_page", 10)),
        Box::new(CustomPager::new("items", |_, _| Some("https://x/2".to_string()))),
    ];

    for pager in pagers {
        assert!(pager.is_empty(&p).unwrap());
        // The next URL exists, yet emptiness alone ends pagination
        assert!(pager.next_page_url(&p).unwrap().is_some());
    }
}

#[test]
fn test_missing_data_path_is_empty() {
    let pager = MarkerPager::new("vpcs", "next", "marker");
    assert!(pager.is_empty(&page("https://x/v1", json!({}))).unwrap());
    assert!(!pager
        .is_empty(&page("https://x/v1", json!({"vpcs": [{"id": 1}]})))
        .unwrap());
}

// ============================================================================
// Offset Pager Tests
// ============================================================================

#[test]
fn test_offset_pager_self_sizing_limit() {
    let pager = OffsetPager::new("items", "offset", "limit", 0);
    let p = page("https://x/v1/items?offset=20", items(7));

    let next = Url::parse(&pager.next_page_url(&p).unwrap().unwrap()).unwrap();
    assert_eq!(query_value(&next, "offset"), Some("27".to_string()));
    assert_eq!(query_value(&next, "limit"), Some("7".to_string()));
}

#[test]
fn test_offset_pager_uses_request_limit() {
    let pager = OffsetPager::new("items", "offset", "limit", 100);
    let p = page("https://x/v1/items?limit=5&offset=10", items(5));

    let next = Url::parse(&pager.next_page_url(&p).unwrap().unwrap()).unwrap();
    assert_eq!(query_value(&next, "offset"), Some("15".to_string()));
    assert_eq!(query_value(&next, "limit"), Some("5".to_string()));
}

#[test]
fn test_offset_pager_default_limit() {
    let pager = OffsetPager::new("items", "offset", "limit", 50);
    assert_eq!(pager.default_query().get("limit"), Some(&QueryValue::Int(50)));

    let p = page("https://x/v1/items", items(3));
    let next = Url::parse(&pager.next_page_url(&p).unwrap().unwrap()).unwrap();
    assert_eq!(query_value(&next, "offset"), Some("50".to_string()));
    assert_eq!(query_value(&next, "limit"), Some("50".to_string()));
}

#[test]
fn test_offset_pager_without_default_injects_nothing() {
    let pager = OffsetPager::new("items", "offset", "limit", 0);
    assert!(pager.default_query().is_empty());
}

#[test]
fn test_offset_pager_stops_when_limit_unresolvable() {
    let pager = OffsetPager::new("items", "offset", "limit", 0);
    let p = page("https://x/v1/items", items(0));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);
}

#[test]
fn test_offset_pager_stops_on_offset_overflow() {
    let pager = OffsetPager::new("items", "offset", "limit", 0);
    let url = format!("https://x/v1/items?offset={}&limit=10", u64::MAX - 5);
    let p = page(&url, items(10));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);
}

// ============================================================================
// Marker Pager Tests
// ============================================================================

#[test]
fn test_marker_pager_marker_from_query_string() {
    let pager = MarkerPager::new("items", "links.next", "marker");
    let p = page(
        "https://x/v1/items",
        json!({"items": [1], "links": {"next": "https://x/v1/items?limit=2&marker=abc123"}}),
    );
    assert_eq!(pager.last_marker(&p), Some("abc123".to_string()));

    let next = pager.next_page_url(&p).unwrap().unwrap();
    assert_eq!(next, "https://x/v1/items?marker=abc123");
}

#[test]
fn test_marker_pager_raw_reference() {
    let pager = MarkerPager::new("items", "page_info.next_marker", "marker");
    let p = page(
        "https://x/v1/items?limit=10",
        json!({"items": [1], "page_info": {"next_marker": "id-0042"}}),
    );
    assert_eq!(pager.last_marker(&p), Some("id-0042".to_string()));
    assert_eq!(
        pager.next_page_url(&p).unwrap().unwrap(),
        "https://x/v1/items?limit=10&marker=id-0042"
    );
}

#[test]
fn test_marker_pager_terminates_without_marker() {
    let pager = MarkerPager::new("items", "page_info.next_marker", "marker");

    let p = page("https://x/v1/items", json!({"items": [1], "page_info": {}}));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);

    let p = page("https://x/v1/items", json!({"items": [1], "page_info": {"next_marker": ""}}));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);

    let p = page(
        "https://x/v1/items",
        json!({"items": [1], "page_info": {"next_marker": "https://x/v1/items?limit=1"}}),
    );
    assert_eq!(pager.last_marker(&p), None);
}

// ============================================================================
// Link Pager Tests
// ============================================================================

#[test]
fn test_link_pager_absolute_link() {
    let pager = LinkPager::new("items", "links.next");
    let p = page(
        "https://x/v1/items",
        json!({"items": [1], "links": {"next": "https://y/v1/items?page=2"}}),
    );
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://y/v1/items?page=2".to_string())
    );
}

#[test]
fn test_link_pager_relative_link() {
    let pager = LinkPager::new("items", "links.next");
    let p = page(
        "https://x/v1/items?page=1",
        json!({"items": [1], "links": {"next": "/v1/items?page=2"}}),
    );
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://x/v1/items?page=2".to_string())
    );
}

#[test]
fn test_link_pager_jsonpath_expression() {
    let pager = LinkPager::new("items", "$.links[?(@.rel == 'next')].href");
    let p = page(
        "https://x/v1/items",
        json!({"items": [1], "links": [{"rel": "next", "href": "https://x/v1/items?marker=9"}]}),
    );
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://x/v1/items?marker=9".to_string())
    );
}

#[test]
fn test_link_pager_terminates() {
    let pager = LinkPager::new("items", "links.next");
    let p = page("https://x/v1/items", json!({"items": [1], "links": {}}));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);

    let p = page("https://x/v1/items", json!({"items": [1], "links": {"next": ""}}));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);
}

// ============================================================================
// Page Size Pager Tests
// ============================================================================

#[test]
fn test_page_size_pager_defaults_to_first_page() {
    let pager = PageSizePager::new("items", "page", "per_page", 20);
    assert_eq!(encode(&pager.default_query()), "per_page=20");

    let p = page("https://x/v1/items?per_page=20", items(20));
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://x/v1/items?per_page=20&page=2".to_string())
    );
}

#[test]
fn test_page_size_pager_increments() {
    let pager = PageSizePager::new("items", "page_num", "", 0);
    assert!(pager.default_query().is_empty());

    let p = page("https://x/v1/items?page_num=4", items(1));
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://x/v1/items?page_num=5".to_string())
    );
}

// ============================================================================
// Custom Pager Tests
// ============================================================================

#[test]
fn test_custom_pager() {
    let pager = CustomPager::new("data", |body, url| {
        let total = body.get("total")?.as_u64()?;
        let page_no = query_number(url, "pageNo").unwrap_or(1);
        if page_no * 2 >= total {
            return None;
        }
        Some(with_query_value(url, "pageNo", &(page_no + 1).to_string()).to_string())
    });

    let p = page("https://x/v1/data?pageNo=1", json!({"data": [1, 2], "total": 5}));
    assert_eq!(
        pager.next_page_url(&p).unwrap(),
        Some("https://x/v1/data?pageNo=2".to_string())
    );

    let p = page("https://x/v1/data?pageNo=3", json!({"data": [5], "total": 5}));
    assert_eq!(pager.next_page_url(&p).unwrap(), None);
}

// ============================================================================
// PagerConfig Tests
// ============================================================================

#[test]
fn test_pager_config_from_yaml() {
    let config: PagerConfig = serde_yaml::from_str(
        "type: marker\ndata_path: vpcs\nnext_exp: page_info.next_marker\n",
    )
    .unwrap();
    assert_eq!(
        config,
        PagerConfig::marker("vpcs", "page_info.next_marker", "marker")
    );

    let config: PagerConfig =
        serde_yaml::from_str("type: offset\ndata_path: items\ndefault_limit: 25\n").unwrap();
    assert_eq!(config, PagerConfig::offset("items", "offset", "limit", 25));
    assert_eq!(encode(&config.build().default_query()), "limit=25");
}

#[test]
fn test_pager_config_build() {
    let pager = PagerConfig::page_size("items", "page", "size", 5).build();
    assert_eq!(pager.data_path(), "items");
    assert_eq!(encode(&pager.default_query()), "size=5");

    let pager = PagerConfig::link("data", "next").build();
    assert_eq!(pager.data_path(), "data");
}
