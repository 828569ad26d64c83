//! Template generation configuration.

use serde::{Deserialize, Serialize};

/// Inputs that shape the generated index templates.
///
/// Built once per run by the caller and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Prefix of every Zipkin index and template name
    pub index_prefix: String,
    /// Number of primary shards per index
    pub shard_count: u32,
    /// Number of replicas per shard
    pub replica_count: u32,
    /// Whether span documents get search mappings
    pub search_enabled: bool,
    /// Whether trace ids are always 128-bit
    pub strict_trace_id: bool,
    /// Cluster version as `major.minor`
    pub cluster_version: f64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            index_prefix: "zipkin".to_string(),
            shard_count: 5,
            replica_count: 1,
            search_enabled: true,
            strict_trace_id: true,
            cluster_version: 7.0,
        }
    }
}

impl TemplateConfig {
    pub fn with_index_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.index_prefix = prefix.into();
        self
    }

    pub fn with_shards(mut self, shards: u32) -> Self {
        self.shard_count = shards;
        self
    }

    pub fn with_replicas(mut self, replicas: u32) -> Self {
        self.replica_count = replicas;
        self
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    pub fn with_strict_trace_id(mut self, strict: bool) -> Self {
        self.strict_trace_id = strict;
        self
    }

    pub fn with_cluster_version(mut self, version: f64) -> Self {
        self.cluster_version = version;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TemplateConfig::default();
        assert_eq!(config.index_prefix, "zipkin");
        assert_eq!(config.shard_count, 5);
        assert_eq!(config.replica_count, 1);
        assert!(config.search_enabled);
        assert!(config.strict_trace_id);
    }

    #[test]
    fn test_builder_methods() {
        let config = TemplateConfig::default()
            .with_index_prefix("tracing")
            .with_shards(3)
            .with_replicas(0)
            .with_search(false)
            .with_strict_trace_id(false)
            .with_cluster_version(6.8);

        assert_eq!(config.index_prefix, "tracing");
        assert_eq!(config.shard_count, 3);
        assert_eq!(config.replica_count, 0);
        assert!(!config.search_enabled);
        assert!(!config.strict_trace_id);
        assert_eq!(config.cluster_version, 6.8);
    }
}
