//! Ensure workflow: register every missing Zipkin index template.

use tracing::{debug, error, info};
use zipkin_templater::{IndexTemplateKind, TemplateBuilder};

use crate::error::EsResult;
use crate::store::TemplateStore;

#[derive(Debug, Clone, Default)]
pub struct EnsureOptions {
    /// Delete existing Zipkin indexes after templates are in place
    pub purge_data: bool,
}

/// Outcome of an ensure run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Template keys registered by this run
    pub created: Vec<String>,
    /// Template keys that were already registered
    pub existing: Vec<String>,
    /// Whether the index purge succeeded
    pub purged: bool,
}

/// Register the templates of every kind that are missing from the store.
///
/// Existing templates are left untouched, even when their content differs.
/// A failed purge is logged and reported, not returned as an error.
pub async fn ensure_templates<S>(
    store: &S,
    builder: &TemplateBuilder,
    options: &EnsureOptions,
) -> EsResult<EnsureReport>
where
    S: TemplateStore + ?Sized,
{
    let mut report = EnsureReport::default();
    let pattern = format!("{}*", builder.index_prefix());

    let registered = store.get_templates(&pattern).await?;
    debug!("Found {} templates matching {}", registered.len(), pattern);

    for kind in IndexTemplateKind::ALL {
        let key = builder.template_key(kind);

        if registered.contains_key(&key) {
            debug!("{} template found", kind);
            report.existing.push(key);
            continue;
        }

        info!("{} template {:?} missing", kind, key);
        let template = builder.template_for(kind);
        let response = store.put_template(&key, &template).await?;
        info!("{} template update: {}", kind, response);
        report.created.push(key);
    }

    if options.purge_data {
        match store.delete_index(&pattern).await {
            Ok(response) => {
                info!("Purged Zipkin data: {}", response);
                report.purged = true;
            }
            Err(e) => error!("Unable to delete Zipkin data: {}", e),
        }
    }

    Ok(report)
}
