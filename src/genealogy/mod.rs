//! Co-starring path search between two actors.
//!
//! Names are resolved once, then [`PathSearch`] asks the oracle for paths of
//! length 1, 2, ... until one matches, and the rows are rebuilt into ordered
//! hops. No graph is held locally.

pub mod hypothesis;
pub mod normalize;
pub mod render;
pub mod resolver;
pub mod search;

pub use hypothesis::{generate, PathHypothesis};
pub use normalize::{normalize, Hop, ResolvedPath};
pub use render::{render_path, render_paths, RenderOptions};
pub use resolver::{NameResolver, PairResolution, Resolution, UnresolvedName};
pub use search::{DepthMatch, PathSearch};

use std::fmt;

use serde::Serialize;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::sparql::Oracle;

/// IRI of an actor or film node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one lookup between two actor names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Genealogy {
    /// At least one name did not resolve.
    Unresolved(Vec<UnresolvedName>),
    /// Both names resolved but no path exists up to the maximum depth.
    NotFound { source: EntityId, target: EntityId },
    /// Shortest paths found at `depth`.
    Found {
        source: EntityId,
        target: EntityId,
        depth: usize,
        paths: Vec<ResolvedPath>,
    },
}

/// Runs name resolution, the path search and normalization for a pair of names.
pub struct GenealogyFinder<O> {
    oracle: O,
    settings: SearchConfig,
}

impl<O: Oracle> GenealogyFinder<O> {
    pub fn new(oracle: O, settings: SearchConfig) -> Self {
        Self { oracle, settings }
    }

    pub async fn find(&self, first: &str, second: &str, alternatives: i64) -> Result<Genealogy> {
        let resolver = NameResolver::new(
            &self.oracle,
            self.settings.name_language.as_str(),
            self.settings.suggestion_precision,
        );
        let (source, target) = match resolver.resolve_pair(first, second).await? {
            PairResolution::Resolved { source, target } => (source, target),
            PairResolution::Unresolved(missing) => return Ok(Genealogy::Unresolved(missing)),
        };

        let search = PathSearch::new(&self.oracle, self.settings.max_depth);
        match search.search_shortest(&source, &target, alternatives).await? {
            Some(DepthMatch { depth, rows }) => {
                let paths = normalize(&rows, &source, &target)?;
                Ok(Genealogy::Found {
                    source,
                    target,
                    depth,
                    paths,
                })
            }
            None => Ok(Genealogy::NotFound { source, target }),
        }
    }
}
