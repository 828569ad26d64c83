//! # zipkin_templater
//!
//! Version specific Elasticsearch index template generation for Zipkin.
//!
//! Given a [`TemplateConfig`] and the version of the target cluster, this crate
//! produces the index templates for the three Zipkin index kinds:
//!
//! - **span**: trace data, optionally with search mappings
//! - **dependency**: pre-aggregated dependency links, never searched
//! - **autocomplete**: tag keys and values for the UI
//!
//! The structural differences between Elasticsearch 5.x, 6.x and 7.x are
//! resolved once by [`CompatibilityRule::resolve`] and applied uniformly by the
//! [`TemplateBuilder`].
//!
//! ## Example
//!
//! ```rust
//! use zipkin_templater::{IndexTemplateKind, TemplateBuilder, TemplateConfig};
//!
//! let config = TemplateConfig::default().with_cluster_version(7.4);
//! let builder = TemplateBuilder::new(config).unwrap();
//!
//! let template = builder.template_for(IndexTemplateKind::Span);
//! assert_eq!(template.index_patterns, Some(vec!["zipkin-span-*".to_string()]));
//!
//! let body = template.to_json(false).unwrap();
//! assert!(body.starts_with('{'));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod kind;
pub mod model;
pub mod serializer;
pub mod version;

pub use builder::{build, TemplateBuilder, TEMPLATE_SUFFIX};
pub use config::TemplateConfig;
pub use error::{TemplaterError, TemplaterResult};
pub use kind::IndexTemplateKind;
pub use model::{
    Analysis, Analyzer, DynamicTemplate, Field, Filter, IndexSettings, Mappings, Settings,
    SourceField, Template, TemplateMappings,
};
pub use serializer::serialize;
pub use version::{CompatibilityRule, MAX_SUPPORTED_VERSION, MIN_SUPPORTED_VERSION};
