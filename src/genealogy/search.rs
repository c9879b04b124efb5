//! Iterative deepening over path-length hypotheses.
//!
//! Each depth is one independent oracle query; the first depth that returns
//! rows is the shortest connection.

use crate::error::Result;
use crate::genealogy::hypothesis::PathHypothesis;
use crate::genealogy::EntityId;
use crate::sparql::{Oracle, Row};

/// Rows returned for the first depth that matched.
#[derive(Debug, Clone)]
pub struct DepthMatch {
    pub depth: usize,
    pub rows: Vec<Row>,
}

pub struct PathSearch<O> {
    oracle: O,
    max_depth: usize,
}

impl<O: Oracle> PathSearch<O> {
    pub fn new(oracle: O, max_depth: usize) -> Self {
        Self { oracle, max_depth }
    }

    /// Rows for the shortest path from `source` to `target`, or nothing when no
    /// depth up to the maximum matched.
    pub async fn search(
        &self,
        source: &EntityId,
        target: &EntityId,
        alternatives: i64,
    ) -> Result<Vec<Row>> {
        Ok(self
            .search_shortest(source, target, alternatives)
            .await?
            .map(|m| m.rows)
            .unwrap_or_default())
    }

    /// Like [`search`](Self::search) but also reports the depth that matched.
    pub async fn search_shortest(
        &self,
        source: &EntityId,
        target: &EntityId,
        alternatives: i64,
    ) -> Result<Option<DepthMatch>> {
        let mut depth = 1;
        loop {
            if depth > self.max_depth {
                log::error!("Max depth {} reached! Aborting search.", self.max_depth);
                return Ok(None);
            }

            let query = PathHypothesis::new(depth, source, target, alternatives)?.to_query();
            log::debug!("depth {}: {}", depth, query);

            let rows = self.oracle.select(&query).await?;
            if !rows.is_empty() {
                log::info!("Found {} path(s) at depth {}", rows.len(), depth);
                return Ok(Some(DepthMatch { depth, rows }));
            }
            depth += 1;
        }
    }
}
