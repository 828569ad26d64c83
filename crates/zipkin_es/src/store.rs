//! Template storage abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use zipkin_templater::Template;

use crate::error::EsResult;

/// Cluster operations needed to ensure index templates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Registered templates matching a name pattern, keyed by template name.
    async fn get_templates(&self, pattern: &str) -> EsResult<HashMap<String, Value>>;

    /// Register a template, returning the cluster's acknowledgement body.
    async fn put_template(&self, name: &str, template: &Template) -> EsResult<String>;

    /// Delete every index matching a pattern, returning the response body.
    async fn delete_index(&self, pattern: &str) -> EsResult<String>;
}
