//! Rendering of templates to their JSON request body.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::TemplaterResult;
use crate::model::Template;

/// Render a template as JSON, indented with tabs when `pretty` is set.
///
/// Unset optional values never appear in the output.
pub fn serialize(template: &Template, pretty: bool) -> TemplaterResult<String> {
    if !pretty {
        return Ok(serde_json::to_string(template)?);
    }

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    template.serialize(&mut serializer)?;

    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Template {
    /// See [`serialize`].
    pub fn to_json(&self, pretty: bool) -> TemplaterResult<String> {
        serialize(self, pretty)
    }
}
