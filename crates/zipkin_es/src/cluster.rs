//! Cluster info as returned by `GET /`.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EsError, EsResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterInfo {
    pub name: String,
    pub cluster_name: String,
    pub cluster_uuid: String,
    pub version: ClusterVersion,
    pub tagline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterVersion {
    pub number: String,
    pub build_flavor: String,
    pub build_type: String,
    pub build_hash: String,
    pub build_date: Option<DateTime<Utc>>,
    pub build_snapshot: bool,
    pub lucene_version: String,
    pub minimum_wire_compatibility_version: String,
    pub minimum_index_compatibility_version: String,
}

/// Parse a `major.minor.patch` version number into `major.minor`.
///
/// The patch component may carry a qualifier such as `0-SNAPSHOT`.
pub fn parse_version(number: &str) -> EsResult<f64> {
    let pattern = Regex::new(r"^(\d+)\.(\d+)\.[^.]+$").unwrap();

    let captures = pattern
        .captures(number.trim())
        .ok_or_else(|| EsError::InvalidVersion(number.to_string()))?;

    format!("{}.{}", &captures[1], &captures[2])
        .parse()
        .map_err(|_| EsError::InvalidVersion(number.to_string()))
}
