//! Ensure command - Register missing templates in a cluster.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use zipkin_es::{ensure_templates, EnsureOptions, EsClient, EsClientOptions};
use zipkin_templater::TemplateBuilder;

use super::TemplateArgs;

#[derive(Args)]
pub struct EnsureArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Elasticsearch host URL
    #[arg(short = 'H', long, env = "ES_HOST", default_value = "http://localhost:9200")]
    pub host: String,

    /// CA bundle for self signed https
    #[arg(long, env = "CA_BUNDLE")]
    pub ca_bundle: Option<PathBuf>,

    /// Basic auth username
    #[arg(long, env = "ES_USERNAME")]
    pub es_username: Option<String>,

    /// Basic auth password
    #[arg(long, env = "ES_PASSWORD", hide_env_values = true)]
    pub es_password: Option<String>,

    /// Purge existing Zipkin data (useful if incorrectly indexed)
    #[arg(long)]
    pub purge_data: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

pub async fn execute(args: EnsureArgs) -> Result<()> {
    let mut options = EsClientOptions::new(&args.host).timeout(Duration::from_secs(args.timeout));
    options.username = args.es_username;
    options.password = args.es_password;
    options.ca_bundle = args.ca_bundle;

    let client = EsClient::connect(options)
        .await
        .with_context(|| format!("Unable to connect to Elasticsearch at {}", args.host))?;
    info!("Connected to Elasticsearch version: {}", client.version());

    let builder = TemplateBuilder::new(args.template.to_config(client.version()))?;

    let ensure_options = EnsureOptions {
        purge_data: args.purge_data,
    };
    let report = ensure_templates(&client, &builder, &ensure_options)
        .await
        .context("Unable to ensure index templates")?;

    if report.created.is_empty() {
        info!("All {} templates already present", report.existing.len());
    } else {
        info!("Created templates: {}", report.created.join(", "));
    }
    if args.purge_data && !report.purged {
        warn!("Zipkin data was not purged");
    }

    Ok(())
}
