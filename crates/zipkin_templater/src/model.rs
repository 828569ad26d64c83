//! Index template document model.
//!
//! A restricted mirror of the Elasticsearch index template JSON. Optional
//! fields are omitted from the rendered document when unset, so `Some(false)`
//! and `None` always mean different things.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// An index template as registered with the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Single index pattern, used before 6.0
    #[serde(rename = "template", default, skip_serializing_if = "Option::is_none")]
    pub legacy_name: Option<String>,
    /// Index pattern list, used from 6.0 on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_patterns: Option<Vec<String>>,
    pub settings: Settings,
    pub mappings: TemplateMappings,
}

/// Mappings either keyed by a type name (before 7.0) or flat (7.0+).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateMappings {
    Untyped(Mappings),
    Typed(BTreeMap<String, Mappings>),
}

impl TemplateMappings {
    /// The mappings regardless of the wrapper shape.
    ///
    /// A typed wrapper always holds exactly one entry.
    pub fn inner(&self) -> Option<&Mappings> {
        match self {
            TemplateMappings::Untyped(mappings) => Some(mappings),
            TemplateMappings::Typed(typed) => typed.values().next(),
        }
    }

    /// The type name key, if the mappings are wrapped.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            TemplateMappings::Untyped(_) => None,
            TemplateMappings::Typed(typed) => typed.keys().next().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub index: IndexSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

/// The `settings.index` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(rename = "number_of_shards", with = "stringified")]
    pub shard_count: u32,
    #[serde(rename = "number_of_replicas", with = "stringified")]
    pub replica_count: u32,
    #[serde(rename = "requests.cache.enable")]
    pub request_cache_enabled: bool,
    /// Only understood by clusters before 7.0.
    #[serde(rename = "mapper.dynamic", default, skip_serializing_if = "Option::is_none")]
    pub dynamic_mapper: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "analyzer", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub analyzers: BTreeMap<String, Analyzer>,
    #[serde(rename = "filter", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, Filter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyzer {
    #[serde(rename = "type")]
    pub analyzer_type: String,
    pub tokenizer: String,
    #[serde(rename = "filter", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_original: Option<bool>,
}

/// Mappings of one document type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mappings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_templates: Option<Vec<DynamicTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Field>>,
}

/// The `_source` meta field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceField {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

/// A named rule mapping fields first seen at index time.
///
/// Rendered as a single entry object: `{"<name>": {"match": .., "mapping": ..}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTemplate {
    pub name: String,
    pub match_mapping_type: Option<String>,
    pub match_pattern: Option<String>,
    pub mapping: Field,
}

#[derive(Serialize, Deserialize)]
struct DynamicTemplateRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    match_mapping_type: Option<String>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    match_pattern: Option<String>,
    mapping: Field,
}

impl Serialize for DynamicTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rule = DynamicTemplateRule {
            match_mapping_type: self.match_mapping_type.clone(),
            match_pattern: self.match_pattern.clone(),
            mapping: self.mapping.clone(),
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &rule)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for DynamicTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, DynamicTemplateRule>::deserialize(deserializer)?;
        if entries.len() != 1 {
            return Err(de::Error::invalid_length(
                entries.len(),
                &"a dynamic template with exactly one name",
            ));
        }
        let (name, rule) = entries
            .into_iter()
            .next()
            .ok_or_else(|| <D::Error as de::Error>::custom("empty dynamic template"))?;

        Ok(Self {
            name,
            match_mapping_type: rule.match_mapping_type,
            match_pattern: rule.match_pattern,
            mapping: rule.mapping,
        })
    }
}

/// One mapped property. Unset attributes fall back to cluster defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielddata: Option<bool>,
    #[serde(rename = "format", default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_above: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub norms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Field>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl Field {
    /// A field of the given type with every other attribute unset.
    pub fn of_type(field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Default::default()
        }
    }

    /// Exact match field.
    ///
    /// Zipkin never scores results, so norms are disabled to save disk.
    pub fn keyword() -> Self {
        Self {
            norms: Some(false),
            ..Self::of_type("keyword")
        }
    }

    /// A field that is stored in `_source` but not indexed.
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
            ..Default::default()
        }
    }

    /// Date field with the given format.
    pub fn date(format: impl Into<String>) -> Self {
        Self {
            date_format: Some(format.into()),
            ..Self::of_type("date")
        }
    }

    /// Object field that rejects unmapped sub fields.
    pub fn strict_object(properties: BTreeMap<String, Field>) -> Self {
        Self {
            dynamic: Some(false),
            properties: Some(properties),
            ..Self::of_type("object")
        }
    }

    pub fn with_ignore_above(mut self, length: u32) -> Self {
        self.ignore_above = Some(length);
        self
    }
}

/// Counts are rendered as strings, the way the cluster reports them back.
mod stringified {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}
