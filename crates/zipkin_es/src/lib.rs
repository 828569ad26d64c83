//! # zipkin_es
//!
//! Elasticsearch access for ensuring Zipkin index templates.
//!
//! - [`EsClient`]: cluster info, version detection and the template endpoints
//! - [`TemplateStore`]: the operations the ensure workflow needs from a cluster
//! - [`ensure_templates`]: registers missing templates, optionally purging data
//!
//! ## Example
//!
//! ```rust,no_run
//! use zipkin_es::{ensure_templates, EnsureOptions, EsClient, EsClientOptions};
//! use zipkin_templater::{TemplateBuilder, TemplateConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EsClient::connect(EsClientOptions::new("http://localhost:9200")).await?;
//!
//!     let config = TemplateConfig::default().with_cluster_version(client.version());
//!     let builder = TemplateBuilder::new(config)?;
//!
//!     let report = ensure_templates(&client, &builder, &EnsureOptions::default()).await?;
//!     println!("created: {:?}", report.created);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod cluster;
pub mod ensure;
pub mod error;
pub mod store;

pub use client::{EsClient, EsClientOptions};
pub use cluster::{parse_version, ClusterInfo, ClusterVersion};
pub use ensure::{ensure_templates, EnsureOptions, EnsureReport};
pub use error::{EsError, EsResult};
pub use store::TemplateStore;
