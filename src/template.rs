//! Path template rendering
//!
//! Handles `{placeholder}` substitution in service request paths such as
//! `autopilot/v3/projects/{project_id}/clusters/{cluster_id}`.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Regex for matching path placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Placeholder always resolved from the client's project
pub const PROJECT_ID: &str = "project_id";

/// Values available to a path template
#[derive(Debug, Clone, Default)]
pub struct PathContext {
    params: BTreeMap<String, String>,
}

impl PathContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with the project id set
    pub fn with_project(project_id: impl Into<String>) -> Self {
        let mut ctx = Self::new();
        ctx.set(PROJECT_ID, project_id);
        ctx
    }

    /// Set a placeholder value, replacing any previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get a placeholder value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Merge another set of values, later values win
    pub fn extend<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.params.insert(k.into(), v.into());
        }
        self
    }
}

/// Render a path template with the given context.
///
/// Every placeholder must resolve; the first unresolved one is reported.
pub fn render_path(template: &str, ctx: &PathContext) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let (Some(full), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        let value = ctx.get(name.as_str()).ok_or_else(|| Error::UnresolvedPlaceholder {
            placeholder: name.as_str().to_string(),
        })?;

        if value.is_empty() {
            return Err(Error::template(format!(
                "placeholder '{}' resolved to an empty value in '{template}'",
                name.as_str()
            )));
        }

        result.push_str(&template[last..full.start()]);
        result.push_str(value);
        last = full.end();
    }

    result.push_str(&template[last..]);
    Ok(result)
}

/// Check if a path contains placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}

/// Extract all placeholder names from a path, in order of appearance
pub fn extract_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_substitution() {
        let ctx = PathContext::with_project("0970d7b7d400f2470fbec00316a03560");
        let result = render_path("autopilot/v3/projects/{project_id}/clusters", &ctx).unwrap();
        assert_eq!(
            result,
            "autopilot/v3/projects/0970d7b7d400f2470fbec00316a03560/clusters"
        );
    }

    #[test]
    fn test_multiple_substitutions() {
        let mut ctx = PathContext::with_project("p1");
        ctx.set("cluster_id", "c-42");

        let result = render_path(
            "autopilot/v3/projects/{project_id}/clusters/{cluster_id}",
            &ctx,
        )
        .unwrap();
        assert_eq!(result, "autopilot/v3/projects/p1/clusters/c-42");
    }

    #[test]
    fn test_repeated_placeholder() {
        let mut ctx = PathContext::new();
        ctx.set("id", "x");
        assert_eq!(render_path("/{id}/{id}", &ctx).unwrap(), "/x/x");
    }

    #[test]
    fn test_unresolved_placeholder() {
        let ctx = PathContext::with_project("p1");
        let err = render_path("v1/{project_id}/jobs/{job_id}", &ctx).unwrap_err();
        match err {
            Error::UnresolvedPlaceholder { placeholder } => assert_eq!(placeholder, "job_id"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let ctx = PathContext::with_project("");
        let err = render_path("v1/{project_id}/items", &ctx).unwrap_err();
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn test_no_placeholders() {
        let ctx = PathContext::new();
        let result = render_path("https://x/v1/items?limit=10", &ctx).unwrap();
        assert_eq!(result, "https://x/v1/items?limit=10");
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("v1/{project_id}"));
        assert!(!has_placeholders("v1/projects"));
        assert!(!has_placeholders("{ not a placeholder }"));
        assert!(!has_placeholders("{'a':'b'}"));
    }

    #[test]
    fn test_extract_placeholders() {
        let names = extract_placeholders("v3/projects/{project_id}/clusters/{cluster_id}");
        assert_eq!(names, vec!["project_id", "cluster_id"]);
    }

    #[test]
    fn test_extend_later_wins() {
        let mut ctx = PathContext::with_project("p1");
        ctx.extend([("project_id", "p2"), ("job_id", "j")]);
        assert_eq!(ctx.get("project_id"), Some("p2"));
        assert_eq!(ctx.get("job_id"), Some("j"));
    }
}
