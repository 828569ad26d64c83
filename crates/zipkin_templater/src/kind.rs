//! Zipkin index template kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemplaterError;

/// The index kinds Zipkin stores data in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTemplateKind {
    Span,
    Dependency,
    #[serde(rename = "autocomplete")]
    AutoComplete,
}

impl IndexTemplateKind {
    /// All kinds, in the order templates are ensured.
    pub const ALL: [IndexTemplateKind; 3] = [
        IndexTemplateKind::AutoComplete,
        IndexTemplateKind::Span,
        IndexTemplateKind::Dependency,
    ];

    /// Name used in index patterns, template keys and the mapping type key.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexTemplateKind::Span => "span",
            IndexTemplateKind::Dependency => "dependency",
            IndexTemplateKind::AutoComplete => "autocomplete",
        }
    }
}

impl fmt::Display for IndexTemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexTemplateKind {
    type Err = TemplaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "span" => Ok(IndexTemplateKind::Span),
            "dependency" => Ok(IndexTemplateKind::Dependency),
            "autocomplete" => Ok(IndexTemplateKind::AutoComplete),
            _ => Err(TemplaterError::UnknownKind(s.to_string())),
        }
    }
}
