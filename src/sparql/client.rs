use crate::config::OracleConfig;
use crate::error::{CastchainError, Result};
use crate::sparql::{Oracle, ResultsEnvelope, Row};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client for a SPARQL endpoint
///
/// Sends `prefixes + body` as a GET request and decodes the JSON result set.
/// One attempt per query: non-success statuses are returned as errors and never retried.
pub struct SparqlClient {
    client: Client,
    endpoint: Url,
    default_graph: Option<String>,
    prefix_block: String,
}

impl SparqlClient {
    /// Create a client for the endpoint described by `config`
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            CastchainError::Config(format!("Invalid endpoint {}: {}", config.endpoint, e))
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CastchainError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let default_graph = if config.default_graph.is_empty() {
            None
        } else {
            Some(config.default_graph.clone())
        };

        Ok(Self {
            client,
            endpoint,
            default_graph,
            prefix_block: config.prefix_block(),
        })
    }

    /// Full query text sent for `body`
    pub fn full_query(&self, body: &str) -> String {
        format!("{}{}", self.prefix_block, body)
    }

    /// Request URL carrying `body` as the percent-encoded `query` parameter
    pub fn request_url(&self, body: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(graph) = &self.default_graph {
                pairs.append_pair("default-graph-uri", graph);
            }
            pairs.append_pair("query", &self.full_query(body));
            pairs.append_pair("output", "json");
        }
        url
    }

    /// Run a SELECT query and return its bindings
    pub async fn execute(&self, body: &str) -> Result<Vec<Row>> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get(self.request_url(body))
            .header(ACCEPT, "application/sparql-results+json")
            .send()
            .await
            .map_err(|e| CastchainError::Transport(format!("Network error: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            return Err(CastchainError::Oracle {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let envelope: ResultsEnvelope = serde_json::from_str(&text)?;

        log::debug!(
            "SPARQL query returned {} row(s) in {:?}",
            envelope.results.bindings.len(),
            start.elapsed()
        );

        Ok(envelope.results.bindings)
    }
}

impl Oracle for SparqlClient {
    async fn select(&self, body: &str) -> Result<Vec<Row>> {
        self.execute(body).await
    }
}
