//! CLI command definitions.
//!
//! Every template flag can also be supplied through the environment variable
//! listed in its help text. Explicit flags take precedence.

use clap::{Args, Parser, Subcommand};

use zipkin_templater::TemplateConfig;

pub mod ensure;
pub mod render;

/// Ensure Zipkin Elasticsearch index templates
#[derive(Parser)]
#[command(name = "ensure-templates")]
#[command(version, about = "Ensure Zipkin Elasticsearch index templates")]
#[command(long_about = r#"
Makes sure an Elasticsearch cluster has the index templates Zipkin expects.
Templates are generated for the cluster's version (5.x, 6.x or 7.x).

COMMANDS:
  ensure  → Connect to the cluster and register missing templates
  render  → Print the templates for a given version without connecting
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register missing index templates in a cluster
    Ensure(ensure::EnsureArgs),

    /// Print index templates for a cluster version
    Render(render::RenderArgs),
}

/// Flags shaping the generated templates.
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Index template name prefix
    #[arg(short, long, env = "INDEX_PREFIX", default_value = "zipkin")]
    pub prefix: String,

    /// Index replica count
    #[arg(short, long, env = "INDEX_REPLICAS", default_value_t = 1)]
    pub replicas: u32,

    /// Index shard count
    #[arg(short, long, env = "INDEX_SHARDS", default_value_t = 5)]
    pub shards: u32,

    /// Disable strict traceID (when migrating between 64-128bit)
    #[arg(
        long = "disable-strict-traceId",
        env = "DISABLE_STRICT_TRACEID",
        value_parser = parse_switch
    )]
    pub disable_strict_trace_id: bool,

    /// Disable search indexes (if not using Zipkin UI)
    #[arg(long, env = "DISABLE_SEARCH", value_parser = parse_switch)]
    pub disable_search: bool,
}

impl TemplateArgs {
    pub fn to_config(&self, cluster_version: f64) -> TemplateConfig {
        TemplateConfig::default()
            .with_index_prefix(&self.prefix)
            .with_replicas(self.replicas)
            .with_shards(self.shards)
            .with_strict_trace_id(!self.disable_strict_trace_id)
            .with_search(!self.disable_search)
            .with_cluster_version(cluster_version)
    }
}

/// Switches are on for `1`, `yes`, `on` and `true`, off for anything else.
fn parse_switch(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "yes" | "on" | "true"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        for value in ["1", "yes", "ON", "true"] {
            assert_eq!(parse_switch(value), Ok(true), "{}", value);
        }
        for value in ["0", "no", "off", "false", ""] {
            assert_eq!(parse_switch(value), Ok(false), "{}", value);
        }
    }

    #[test]
    fn test_template_flags() {
        let cli = Cli::try_parse_from([
            "ensure-templates",
            "render",
            "--es-version",
            "6.8",
            "-p",
            "tracing",
            "-r",
            "2",
            "-s",
            "3",
            "--disable-strict-traceId",
        ])
        .unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let config = args.template.to_config(6.8);
        assert_eq!(config.index_prefix, "tracing");
        assert_eq!(config.replica_count, 2);
        assert_eq!(config.shard_count, 3);
        assert!(!config.strict_trace_id);
        assert!(config.search_enabled);
    }

    #[test]
    fn test_disable_search_only_affects_search() {
        let cli = Cli::try_parse_from(["ensure-templates", "render", "--disable-search"]).unwrap();

        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        let config = args.template.to_config(7.0);
        assert!(!config.search_enabled);
        assert!(config.strict_trace_id);
    }

    #[test]
    fn test_ensure_defaults() {
        let cli = Cli::try_parse_from(["ensure-templates", "ensure"]).unwrap();

        let Commands::Ensure(args) = cli.command else {
            panic!("expected ensure command");
        };
        assert_eq!(args.host, "http://localhost:9200");
        assert!(!args.purge_data);
        assert_eq!(args.template.prefix, "zipkin");
    }
}
