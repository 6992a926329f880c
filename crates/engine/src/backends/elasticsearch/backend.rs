//! Elasticsearch client construction and the `DocumentClient` implementation.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::response::Response;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts};
use elasticsearch::params::Refresh;
use elasticsearch::{BulkOperation, BulkParts, DeleteByQueryParts, Elasticsearch, SearchParts};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::core::DocumentClient;
use crate::error::{ClientError, ClientResult};
use crate::types::{Document, SearchParameters, SearchResponse};

/// Authentication configuration for Elasticsearch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElasticsearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Configuration for the Elasticsearch client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Elasticsearch node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    pub nodes: Vec<String>,

    /// Number of primary shards for indices created without an explicit body
    /// (default: 1).
    #[serde(default = "default_shards")]
    pub number_of_shards: u32,

    /// Number of replica shards for indices created without an explicit body
    /// (default: 1).
    #[serde(default = "default_replicas")]
    pub number_of_replicas: u32,

    /// Whether mutation calls force an index refresh so changes are
    /// immediately searchable (default: false).
    ///
    /// Intended for tests; production deployments rely on the index refresh
    /// interval instead.
    #[serde(default)]
    pub refresh_documents: bool,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<ElasticsearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,
}

fn default_shards() -> u32 {
    1
}

fn default_replicas() -> u32 {
    1
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec!["http://localhost:9200".to_string()],
            number_of_shards: default_shards(),
            number_of_replicas: default_replicas(),
            refresh_documents: false,
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
        }
    }
}

/// Document-store client backed by an Elasticsearch cluster.
///
/// The underlying HTTP transport manages connections internally and is safe
/// for concurrent independent calls.
pub struct ElasticsearchClient {
    client: Elasticsearch,
    config: ElasticsearchConfig,
}

impl Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchClient {
    /// Creates a client from the given configuration.
    pub fn new(config: ElasticsearchConfig) -> ClientResult<Self> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Builds the Elasticsearch transport from configuration.
    fn build_client(config: &ElasticsearchConfig) -> ClientResult<Elasticsearch> {
        let url = config
            .nodes
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:9200".to_string());

        let parsed_url: elasticsearch::http::Url =
            url.parse().map_err(|e| ClientError::Transport {
                message: format!("invalid node URL: {}", e),
                source: None,
            })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                ElasticsearchAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                ElasticsearchAuth::Bearer { token } => {
                    builder.auth(Credentials::Bearer(token.clone()))
                }
            };
        }

        let transport = builder.build().map_err(|e| ClientError::Transport {
            message: format!("failed to build transport: {}", e),
            source: None,
        })?;

        Ok(Elasticsearch::new(transport))
    }

    /// The client configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    fn refresh(&self) -> Refresh {
        if self.config.refresh_documents {
            Refresh::True
        } else {
            Refresh::False
        }
    }

    /// Settings body used when index creation supplies no body of its own.
    fn default_index_body(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.config.number_of_shards,
                "number_of_replicas": self.config.number_of_replicas,
            }
        })
    }

    fn transport_error(err: elasticsearch::Error) -> ClientError {
        ClientError::Transport {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    async fn read_body(response: Response) -> ClientResult<Value> {
        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Malformed {
                message: format!("failed to parse response body: {}", e),
            })
    }

    /// Maps a non-success response into the typed error taxonomy.
    async fn ensure_success(response: Response, index: &str) -> ClientResult<()> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(());
        }

        if status.as_u16() == 404 {
            return Err(ClientError::IndexNotFound {
                index: index.to_string(),
            });
        }

        let reason = response.text().await.unwrap_or_default();
        Err(ClientError::Response {
            status: status.as_u16(),
            reason,
        })
    }

    /// Inspects a `_bulk` response body for per-item failures.
    ///
    /// Item-level 404s map to the typed not-found error, but only when no
    /// other failure kind occurred; any other failing item wins and surfaces
    /// with the backend's reason.
    fn check_bulk_response(body: &Value) -> ClientResult<()> {
        if !body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(());
        }

        let mut not_found: Option<(String, String)> = None;
        let mut failure: Option<(u16, String)> = None;

        let items = body.get("items").and_then(Value::as_array);
        for item in items.into_iter().flatten() {
            let Some(result) = item.as_object().and_then(|ops| ops.values().next()) else {
                continue;
            };

            let status = result.get("status").and_then(Value::as_u64).unwrap_or(200) as u16;
            if (200..300).contains(&status) {
                continue;
            }

            let index = result
                .get("_index")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let id = result
                .get("_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            if status == 404 {
                not_found.get_or_insert((index, id));
            } else {
                let reason = result
                    .get("error")
                    .map(Value::to_string)
                    .unwrap_or_else(|| "unknown bulk failure".to_string());
                failure.get_or_insert((status, reason));
            }
        }

        match (failure, not_found) {
            (Some((status, reason)), _) => Err(ClientError::Response { status, reason }),
            (None, Some((index, id))) => Err(ClientError::DocumentNotFound { index, id }),
            (None, None) => Err(ClientError::Malformed {
                message: "bulk response flagged errors but reported no failing item".to_string(),
            }),
        }
    }

    async fn send_bulk(&self, body: Vec<BulkOperation<Value>>) -> ClientResult<()> {
        let response = self
            .client
            .bulk(BulkParts::None)
            .refresh(self.refresh())
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ClientError::Response {
                status: status.as_u16(),
                reason,
            });
        }

        let body = Self::read_body(response).await?;
        Self::check_bulk_response(&body)
    }
}

#[async_trait]
impl DocumentClient for ElasticsearchClient {
    async fn index(&self, documents: Vec<Document>) -> ClientResult<()> {
        debug!(count = documents.len(), "bulk indexing");

        let body: Vec<BulkOperation<Value>> = documents
            .into_iter()
            .map(|Document { id, index, fields }| {
                BulkOperation::index(Value::Object(fields))
                    .id(id)
                    .index(index)
                    .into()
            })
            .collect();

        self.send_bulk(body).await
    }

    async fn delete(&self, index: &str, ids: Vec<String>) -> ClientResult<()> {
        debug!(count = ids.len(), index = %index, "bulk deleting");

        let body: Vec<BulkOperation<Value>> = ids
            .into_iter()
            .map(|id| BulkOperation::delete(id).index(index).into())
            .collect();

        self.send_bulk(body).await
    }

    async fn delete_by_query(&self, index: &str, query: Value) -> ClientResult<()> {
        debug!(index = %index, "delete by query");

        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[index]))
            .refresh(self.config.refresh_documents)
            .body(json!({ "query": query }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::ensure_success(response, index).await
    }

    async fn search(&self, parameters: &SearchParameters) -> ClientResult<SearchResponse> {
        debug!(index = %parameters.index, "searching");

        let response = self
            .client
            .search(SearchParts::Index(&[parameters.index.as_str()]))
            .body(parameters.body.clone())
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            if status.as_u16() == 404 || reason.contains("index_not_found_exception") {
                return Err(ClientError::IndexNotFound {
                    index: parameters.index.clone(),
                });
            }
            return Err(ClientError::Response {
                status: status.as_u16(),
                reason,
            });
        }

        let body = Self::read_body(response).await?;
        SearchResponse::from_raw(body)
    }

    async fn index_exists(&self, name: &str) -> ClientResult<bool> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        Ok(response.status_code().is_success())
    }

    async fn create_index(&self, name: &str, body: Value) -> ClientResult<()> {
        debug!(index = %name, "creating index");

        let body = if body.as_object().is_none_or(|obj| obj.is_empty()) {
            self.default_index_body()
        } else {
            body
        };

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(name))
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status_code();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(ClientError::Response {
                status: status.as_u16(),
                reason,
            });
        }

        Ok(())
    }

    async fn delete_index(&self, name: &str) -> ClientResult<()> {
        debug!(index = %name, "deleting index");

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[name]))
            .send()
            .await
            .map_err(Self::transport_error)?;

        Self::ensure_success(response, name).await
    }
}
