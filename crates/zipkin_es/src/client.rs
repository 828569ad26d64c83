//! HTTP client for the Elasticsearch endpoints used by the templater.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info};
use zipkin_templater::Template;

use crate::cluster::{parse_version, ClusterInfo};
use crate::error::{EsError, EsResult};
use crate::store::TemplateStore;

const TEMPLATE_PATH: &str = "_template";

/// Connection settings for [`EsClient`].
#[derive(Debug, Clone, Default)]
pub struct EsClientOptions {
    /// Base URL of the cluster
    pub host: String,
    /// Basic auth user, auth is skipped when unset
    pub username: Option<String>,
    pub password: Option<String>,
    /// PEM CA certificate trusted for https hosts
    pub ca_bundle: Option<PathBuf>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl EsClientOptions {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client bound to one cluster whose version is known.
pub struct EsClient {
    client: Client,
    host: String,
    username: Option<String>,
    password: Option<String>,
    cluster_info: ClusterInfo,
    version: f64,
}

impl EsClient {
    /// Connect to a cluster and detect its version.
    pub async fn connect(options: EsClientOptions) -> EsResult<Self> {
        let url = Url::parse(&options.host).map_err(|e| EsError::InvalidHost {
            host: options.host.clone(),
            message: e.to_string(),
        })?;

        let mut builder = Client::builder()
            .timeout(options.timeout.unwrap_or(Duration::from_secs(30)))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ));

        if url.scheme() == "https" {
            if let Some(path) = &options.ca_bundle {
                debug!("Trusting CA bundle {:?}", path);
                builder = builder.add_root_certificate(load_ca_bundle(path)?);
            }
        }

        let mut client = Self {
            client: builder.build()?,
            host: options.host.trim_end_matches('/').to_string(),
            username: options.username.filter(|u| !u.is_empty()),
            password: options.password,
            cluster_info: ClusterInfo::default(),
            version: 0.0,
        };

        debug!("Trying to connect to host: {}", client.host);
        let response = client.send(client.request(Method::GET, "")).await?;
        client.cluster_info = response.json().await?;
        client.version = parse_version(&client.cluster_info.version.number)?;

        info!(
            "Connected to Elasticsearch cluster {:?} version {}",
            client.cluster_info.cluster_name, client.cluster_info.version.number
        );

        Ok(client)
    }

    /// Cluster version as `major.minor`.
    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn cluster_info(&self) -> &ClusterInfo {
        &self.cluster_info
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, format!("{}/{}", self.host, path));
        match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> EsResult<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(status_error(response).await)
    }
}

#[async_trait]
impl TemplateStore for EsClient {
    async fn get_templates(&self, pattern: &str) -> EsResult<HashMap<String, Value>> {
        let response = self
            .request(Method::GET, &format!("{}/{}", TEMPLATE_PATH, pattern))
            .query(&[("local", "false")])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(HashMap::new()),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(status_error(response).await),
        }
    }

    async fn put_template(&self, name: &str, template: &Template) -> EsResult<String> {
        let request = self
            .request(Method::PUT, &format!("{}/{}", TEMPLATE_PATH, name))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(template.to_json(false)?);

        Ok(self.send(request).await?.text().await?)
    }

    async fn delete_index(&self, pattern: &str) -> EsResult<String> {
        let request = self.request(Method::DELETE, pattern);
        Ok(self.send(request).await?.text().await?)
    }
}

async fn status_error(response: Response) -> EsError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    EsError::Status { status, url, body }
}

fn load_ca_bundle(path: &Path) -> EsResult<Certificate> {
    let pem = fs::read(path)?;
    Certificate::from_pem(&pem).map_err(|e| EsError::InvalidCaBundle {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = EsClientOptions::new("https://es:9200")
            .credentials("elastic", "changeme")
            .ca_bundle("/etc/ssl/ca.pem")
            .timeout(Duration::from_secs(5));

        assert_eq!(options.host, "https://es:9200");
        assert_eq!(options.username.as_deref(), Some("elastic"));
        assert_eq!(options.password.as_deref(), Some("changeme"));
        assert_eq!(options.ca_bundle, Some(PathBuf::from("/etc/ssl/ca.pem")));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_load_missing_ca_bundle() {
        let err = load_ca_bundle(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, EsError::Io(_)));
    }

    #[test]
    fn test_load_invalid_ca_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ca.pem");
        fs::write(&path, "not a certificate").unwrap();

        let err = load_ca_bundle(&path).unwrap_err();
        assert!(matches!(err, EsError::InvalidCaBundle { .. }));
    }
}
