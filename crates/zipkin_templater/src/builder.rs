//! Index template builders.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::TemplateConfig;
use crate::error::TemplaterResult;
use crate::kind::IndexTemplateKind;
use crate::model::{
    Analysis, Analyzer, DynamicTemplate, Field, Filter, IndexSettings, Mappings, Settings,
    SourceField, Template, TemplateMappings,
};
use crate::version::CompatibilityRule;

/// Suffix of every template key.
pub const TEMPLATE_SUFFIX: &str = "_template";

// Maximum length of most names, IP literals and IDs.
const SHORT_STRING_LENGTH: u32 = 256;

const TRACE_ID_ANALYZER: &str = "traceId_analyzer";
const TRACE_ID_FILTER: &str = "traceId_filter";
// Keeps the low 64 bits of a hex trace id so 64 and 128-bit ids match.
const TRACE_ID_PATTERN: &str = "([0-9a-f]{1,16})$";

// Composite query field, searched instead of annotations and tags.
const QUERY_FIELD: &str = "_q";

/// Builds version specific templates for one configuration.
///
/// The compatibility rule is resolved once on construction.
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    config: TemplateConfig,
    rule: CompatibilityRule,
}

/// Build the template of one kind.
pub fn build(kind: IndexTemplateKind, config: &TemplateConfig) -> TemplaterResult<Template> {
    Ok(TemplateBuilder::new(config.clone())?.template_for(kind))
}

impl TemplateBuilder {
    /// Fails with `UnsupportedVersion` when the configured cluster version is
    /// outside 5.x to 7.x.
    pub fn new(config: TemplateConfig) -> TemplaterResult<Self> {
        let rule = CompatibilityRule::resolve(config.cluster_version)?;
        debug!(
            "Resolved template rules for version {}: {:?}",
            config.cluster_version, rule
        );
        Ok(Self { config, rule })
    }

    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    pub fn rule(&self) -> &CompatibilityRule {
        &self.rule
    }

    /// Index prefix including the version specific delimiter.
    pub fn index_prefix(&self) -> String {
        format!("{}{}", self.config.index_prefix, self.rule.name_delimiter)
    }

    /// Pattern matching every index of a kind.
    pub fn index_pattern(&self, kind: IndexTemplateKind) -> String {
        format!("{}{}-*", self.index_prefix(), kind)
    }

    /// Name the template of a kind is registered under.
    pub fn template_key(&self, kind: IndexTemplateKind) -> String {
        format!("{}{}{}", self.index_prefix(), kind, TEMPLATE_SUFFIX)
    }

    pub fn template_for(&self, kind: IndexTemplateKind) -> Template {
        match kind {
            IndexTemplateKind::Span => self.span_template(),
            IndexTemplateKind::Dependency => self.dependency_template(),
            IndexTemplateKind::AutoComplete => self.autocomplete_template(),
        }
    }

    pub fn span_template(&self) -> Template {
        let mut settings = self.settings();

        let trace_id = if self.config.strict_trace_id {
            Field::keyword()
        } else {
            // Mixed length trace ids need fielddata, which is heap hungry. Only
            // meant for the duration of a 64 to 128-bit migration.
            settings.analysis = Some(trace_id_analysis());
            Field {
                analyzer: Some(TRACE_ID_ANALYZER.to_string()),
                fielddata: Some(true),
                ..Field::of_type("text")
            }
        };

        let mut properties = BTreeMap::from([
            ("traceId".to_string(), trace_id),
            ("annotations".to_string(), Field::disabled()),
            ("tags".to_string(), Field::disabled()),
        ]);

        let mappings = if self.config.search_enabled {
            let endpoint =
                || Field::strict_object(BTreeMap::from([("serviceName".to_string(), Field::keyword())]));

            properties.extend([
                ("name".to_string(), Field::keyword()),
                ("localEndpoint".to_string(), endpoint()),
                ("remoteEndpoint".to_string(), endpoint()),
                ("timestamp_millis".to_string(), Field::date("epoch_millis")),
                ("duration".to_string(), Field::of_type("long")),
                (QUERY_FIELD.to_string(), Field::keyword()),
            ]);

            Mappings {
                source: Some(SourceField {
                    excludes: vec![QUERY_FIELD.to_string()],
                }),
                dynamic_templates: Some(vec![DynamicTemplate {
                    name: "strings".to_string(),
                    match_mapping_type: Some("string".to_string()),
                    match_pattern: Some("*".to_string()),
                    mapping: Field::keyword().with_ignore_above(SHORT_STRING_LENGTH),
                }]),
                properties: Some(properties),
                ..Default::default()
            }
        } else {
            Mappings {
                properties: Some(properties),
                ..Default::default()
            }
        };

        self.assemble(IndexTemplateKind::Span, settings, mappings)
    }

    /// Dependency links are only fetched by id, never searched.
    pub fn dependency_template(&self) -> Template {
        let mappings = Mappings {
            enabled: Some(false),
            ..Default::default()
        };
        self.assemble(IndexTemplateKind::Dependency, self.settings(), mappings)
    }

    pub fn autocomplete_template(&self) -> Template {
        let mappings = Mappings {
            enabled: Some(true),
            properties: Some(BTreeMap::from([
                ("tagKey".to_string(), Field::keyword()),
                ("tagValue".to_string(), Field::keyword()),
            ])),
            ..Default::default()
        };
        self.assemble(IndexTemplateKind::AutoComplete, self.settings(), mappings)
    }

    fn settings(&self) -> Settings {
        Settings {
            index: IndexSettings {
                shard_count: self.config.shard_count,
                replica_count: self.config.replica_count,
                request_cache_enabled: true,
                // Removed in 7.0 without a deprecation notice.
                dynamic_mapper: self.rule.supports_dynamic_mapper_setting.then_some(false),
            },
            analysis: None,
        }
    }

    fn assemble(&self, kind: IndexTemplateKind, settings: Settings, mappings: Mappings) -> Template {
        let pattern = self.index_pattern(kind);
        let (legacy_name, index_patterns) = if self.rule.uses_named_template_field {
            (Some(pattern), None)
        } else {
            (None, Some(vec![pattern]))
        };

        let mappings = if self.rule.uses_typed_mapping_wrapper {
            TemplateMappings::Typed(BTreeMap::from([(kind.to_string(), mappings)]))
        } else {
            TemplateMappings::Untyped(mappings)
        };

        Template {
            legacy_name,
            index_patterns,
            settings,
            mappings,
        }
    }
}

fn trace_id_analysis() -> Analysis {
    Analysis {
        analyzers: BTreeMap::from([(
            TRACE_ID_ANALYZER.to_string(),
            Analyzer {
                analyzer_type: "custom".to_string(),
                tokenizer: "keyword".to_string(),
                filters: vec![TRACE_ID_FILTER.to_string()],
            },
        )]),
        filters: BTreeMap::from([(
            TRACE_ID_FILTER.to_string(),
            Filter {
                filter_type: "pattern_capture".to_string(),
                patterns: vec![TRACE_ID_PATTERN.to_string()],
                preserve_original: Some(true),
            },
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplaterError;

    fn builder(version: f64) -> TemplateBuilder {
        TemplateBuilder::new(TemplateConfig::default().with_cluster_version(version)).unwrap()
    }

    #[test]
    fn test_naming_helpers() {
        let v6 = builder(6.8);
        assert_eq!(v6.index_prefix(), "zipkin:");
        assert_eq!(v6.index_pattern(IndexTemplateKind::Span), "zipkin:span-*");
        assert_eq!(
            v6.template_key(IndexTemplateKind::AutoComplete),
            "zipkin:autocomplete_template"
        );

        let v7 = builder(7.10);
        assert_eq!(v7.index_prefix(), "zipkin-");
        assert_eq!(
            v7.template_key(IndexTemplateKind::Dependency),
            "zipkin-dependency_template"
        );
    }

    #[test]
    fn test_builder_rejects_unsupported_version() {
        let err = TemplateBuilder::new(TemplateConfig::default().with_cluster_version(8.0))
            .unwrap_err();
        assert!(matches!(err, TemplaterError::UnsupportedVersion(_)));

        for kind in IndexTemplateKind::ALL {
            let config = TemplateConfig::default().with_cluster_version(4.9);
            assert!(build(kind, &config).is_err());
        }
    }

    #[test]
    fn test_legacy_name_before_6() {
        let template = builder(5.6).template_for(IndexTemplateKind::Span);
        assert_eq!(template.legacy_name.as_deref(), Some("zipkin:span-*"));
        assert!(template.index_patterns.is_none());
    }

    #[test]
    fn test_strict_trace_id_has_no_analysis() {
        let template = builder(7.0).span_template();
        assert!(template.settings.analysis.is_none());

        let mappings = template.mappings.inner().unwrap();
        let trace_id = &mappings.properties.as_ref().unwrap()["traceId"];
        assert_eq!(trace_id, &Field::keyword());
    }

    #[test]
    fn test_lenient_trace_id_adds_analyzer() {
        let config = TemplateConfig::default()
            .with_strict_trace_id(false)
            .with_cluster_version(7.0);
        let template = TemplateBuilder::new(config).unwrap().span_template();

        let analysis = template.settings.analysis.unwrap();
        assert_eq!(analysis.analyzers.len(), 1);
        assert_eq!(analysis.filters.len(), 1);

        let analyzer = &analysis.analyzers[TRACE_ID_ANALYZER];
        assert_eq!(analyzer.analyzer_type, "custom");
        assert_eq!(analyzer.tokenizer, "keyword");
        assert_eq!(analyzer.filters, vec![TRACE_ID_FILTER.to_string()]);

        let filter = &analysis.filters[TRACE_ID_FILTER];
        assert_eq!(filter.filter_type, "pattern_capture");
        assert_eq!(filter.patterns, vec!["([0-9a-f]{1,16})$".to_string()]);
        assert_eq!(filter.preserve_original, Some(true));

        let mappings = template.mappings.inner().unwrap();
        let trace_id = &mappings.properties.as_ref().unwrap()["traceId"];
        assert_eq!(trace_id.field_type.as_deref(), Some("text"));
        assert_eq!(trace_id.fielddata, Some(true));
        assert_eq!(trace_id.analyzer.as_deref(), Some(TRACE_ID_ANALYZER));
    }

    #[test]
    fn test_analysis_only_on_span_template() {
        let config = TemplateConfig::default().with_strict_trace_id(false);
        let builder = TemplateBuilder::new(config).unwrap();
        assert!(builder.dependency_template().settings.analysis.is_none());
        assert!(builder.autocomplete_template().settings.analysis.is_none());
    }

    #[test]
    fn test_search_disabled_span_mappings() {
        let config = TemplateConfig::default().with_search(false);
        let template = TemplateBuilder::new(config).unwrap().span_template();
        let mappings = template.mappings.inner().unwrap();

        let names: Vec<&str> = mappings
            .properties
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["annotations", "tags", "traceId"]);
        assert!(mappings.dynamic_templates.is_none());
        assert!(mappings.source.is_none());
        assert!(mappings.enabled.is_none());
    }

    #[test]
    fn test_search_enabled_span_mappings() {
        let template = builder(7.0).span_template();
        let mappings = template.mappings.inner().unwrap();
        let properties = mappings.properties.as_ref().unwrap();

        assert_eq!(mappings.source.as_ref().unwrap().excludes, vec!["_q".to_string()]);
        let dynamic = mappings.dynamic_templates.as_ref().unwrap();
        assert_eq!(dynamic.len(), 1);
        assert_eq!(dynamic[0].mapping.ignore_above, Some(256));

        for endpoint in ["localEndpoint", "remoteEndpoint"] {
            let field = &properties[endpoint];
            assert_eq!(field.dynamic, Some(false));
            assert_eq!(
                field.properties.as_ref().unwrap()["serviceName"],
                Field::keyword()
            );
        }
        assert_eq!(properties["timestamp_millis"], Field::date("epoch_millis"));
        assert_eq!(properties["duration"], Field::of_type("long"));
        assert_eq!(properties["annotations"], Field::disabled());
        assert_eq!(properties["tags"], Field::disabled());
        assert_eq!(properties["name"], Field::keyword());
    }

    #[test]
    fn test_counts_copied_verbatim() {
        let config = TemplateConfig::default().with_shards(12).with_replicas(0);
        let template = TemplateBuilder::new(config).unwrap().autocomplete_template();
        assert_eq!(template.settings.index.shard_count, 12);
        assert_eq!(template.settings.index.replica_count, 0);
        assert!(template.settings.index.request_cache_enabled);
    }
}
