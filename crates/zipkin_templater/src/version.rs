//! Elasticsearch version compatibility rules.
//!
//! Every structural difference between the supported release lines is decided
//! here, so builders never compare version numbers themselves.

use crate::error::{TemplaterError, TemplaterResult};

/// Lowest supported cluster version (inclusive).
pub const MIN_SUPPORTED_VERSION: f64 = 5.0;

/// Upper bound of supported cluster versions (exclusive).
pub const MAX_SUPPORTED_VERSION: f64 = 8.0;

/// Structural rules that differ between Elasticsearch release lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityRule {
    /// Separator between the index prefix and the index kind.
    pub name_delimiter: char,
    /// Pre 6.0 templates name their pattern with a single `template` field.
    pub uses_named_template_field: bool,
    /// Pre 7.0 mappings are nested under a type name key.
    pub uses_typed_mapping_wrapper: bool,
    /// Pre 7.0 clusters accept the `index.mapper.dynamic` setting.
    pub supports_dynamic_mapper_setting: bool,
}

impl CompatibilityRule {
    /// Resolve the rules for a cluster version such as `6.8`.
    pub fn resolve(version: f64) -> TemplaterResult<Self> {
        if !Self::is_supported(version) {
            return Err(TemplaterError::UnsupportedVersion(version));
        }

        Ok(Self {
            // Colons are not allowed in index names starting with 7.0.
            name_delimiter: if version < 7.0 { ':' } else { '-' },
            uses_named_template_field: version < 6.0,
            // 7.0 removed mapping types.
            uses_typed_mapping_wrapper: version < 7.0,
            supports_dynamic_mapper_setting: version < 7.0,
        })
    }

    /// Check whether a version falls inside the supported range.
    pub fn is_supported(version: f64) -> bool {
        (MIN_SUPPORTED_VERSION..MAX_SUPPORTED_VERSION).contains(&version)
    }
}
