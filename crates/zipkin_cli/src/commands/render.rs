//! Render command - Print templates without contacting a cluster.

use anyhow::Result;
use clap::Args;
use tracing::info;

use zipkin_templater::{IndexTemplateKind, TemplateBuilder};

use super::TemplateArgs;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Cluster version to render for, as major.minor
    #[arg(long, default_value = "7.0")]
    pub es_version: f64,

    /// Only render one kind (span, dependency, autocomplete)
    #[arg(long)]
    pub kind: Option<IndexTemplateKind>,

    /// Print single line JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let builder = TemplateBuilder::new(args.template.to_config(args.es_version))?;

    let kinds = match args.kind {
        Some(kind) => vec![kind],
        None => IndexTemplateKind::ALL.to_vec(),
    };

    for kind in kinds {
        info!("Rendering {}", builder.template_key(kind));
        println!("{}", builder.template_for(kind).to_json(!args.compact)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{Cli, Commands};

    fn parse(args: &[&str]) -> RenderArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Render(args) => args,
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_parse_kind() {
        let args = parse(&["ensure-templates", "render", "--kind", "span", "--compact"]);
        assert_eq!(args.kind, Some(IndexTemplateKind::Span));
        assert!(args.compact);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["ensure-templates", "render", "--kind", "annotation"]).is_err());
    }

    #[test]
    fn test_render_unsupported_version_fails() {
        let args = parse(&["ensure-templates", "render", "--es-version", "8.1"]);
        assert!(execute(args).is_err());
    }

    #[test]
    fn test_render_supported_version() {
        let args = parse(&["ensure-templates", "render", "--es-version", "5.6", "--compact"]);
        assert!(execute(args).is_ok());
    }
}
