//! SPARQL plumbing: result rows, term rendering and the HTTP client.
//!
//! The rest of the crate talks to the endpoint through the [`Oracle`] trait so
//! the resolver and the path search can be driven by a scripted oracle in tests.

mod client;
pub mod term;

pub use client::SparqlClient;

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// One value in a result row (`{ "type": "uri", "value": "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Binding {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub value: String,
}

impl Binding {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: Some("uri".to_string()),
            value: value.into(),
        }
    }

    #[cfg(test)]
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: Some("literal".to_string()),
            value: value.into(),
        }
    }
}

/// One satisfying assignment, keyed by variable name without the leading `?`.
pub type Row = HashMap<String, Binding>;

/// Look up the value bound to `var` in `row`.
pub fn value<'a>(row: &'a Row, var: &str) -> Option<&'a str> {
    row.get(var).map(|b| b.value.as_str())
}

/// JSON envelope returned by the endpoint for SELECT queries.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope {
    pub results: ResultSet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultSet {
    #[serde(default)]
    pub bindings: Vec<Row>,
}

/// The external knowledge-graph query service.
///
/// `select` takes a query body (everything after the prefix block) and returns
/// the decoded bindings. One call is one round trip; implementations do not
/// retry or cache.
#[allow(async_fn_in_trait)]
pub trait Oracle {
    async fn select(&self, body: &str) -> Result<Vec<Row>>;
}

impl<O: Oracle> Oracle for &O {
    async fn select(&self, body: &str) -> Result<Vec<Row>> {
        (**self).select(body).await
    }
}
