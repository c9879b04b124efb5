//! Free-text actor names to graph identifiers, with suggestions on a miss.

use crate::error::{CastchainError, Result};
use crate::genealogy::EntityId;
use crate::sparql::{term, value, Oracle};

/// Outcome of resolving a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(EntityId),
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },
}

/// Outcome of resolving the two endpoints of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairResolution {
    Resolved { source: EntityId, target: EntityId },
    /// Every input that failed, in argument order.
    Unresolved(Vec<UnresolvedName>),
}

/// A name with no cast-credited entity behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedName {
    /// 1 for the first actor argument, 2 for the second.
    pub position: usize,
    pub name: String,
    pub suggestions: Vec<String>,
}

/// Token used for the suggestions lookup: the first word of a multi-word
/// name, otherwise the first `precision` characters.
pub fn search_token(name: &str, precision: usize) -> String {
    if name.contains(' ') {
        name.split_whitespace().next().unwrap_or_default().to_string()
    } else {
        name.chars().take(precision).collect()
    }
}

fn ensure_not_blank(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CastchainError::InvalidInput("actor name must not be blank".to_string()));
    }
    Ok(())
}

pub struct NameResolver<O> {
    oracle: O,
    language: String,
    precision: usize,
}

impl<O: Oracle> NameResolver<O> {
    pub fn new(oracle: O, language: impl Into<String>, precision: usize) -> Self {
        Self {
            oracle,
            language: language.into(),
            precision,
        }
    }

    fn name_clause(&self, var: &str, film_var: &str, name: &str) -> String {
        format!(
            "?{var} foaf:name {literal}. ?{film} dbpo:starring ?{var}.",
            var = var,
            film = film_var,
            literal = term::lang_literal(name, &self.language),
        )
    }

    /// Resolve one name.
    pub async fn resolve(&self, name: &str) -> Result<Resolution> {
        ensure_not_blank(name)?;
        let query = format!(
            "SELECT ?actor WHERE {{ {} }} LIMIT 1",
            self.name_clause("actor", "film", name)
        );
        log::debug!("{}", query);

        let rows = self.oracle.select(&query).await?;
        match rows.first().and_then(|row| value(row, "actor")) {
            Some(iri) => {
                log::info!("Resolved {:?} to {}", name, iri);
                Ok(Resolution::Found(EntityId::new(iri)))
            }
            None => Ok(Resolution::NotFound {
                name: name.to_string(),
                suggestions: self.suggestions(name).await?,
            }),
        }
    }

    /// Resolve both names in one round trip.
    ///
    /// Each name sits in its own `OPTIONAL` group so a miss on one side still
    /// lets the other bind. Suggestions are fetched for every miss.
    pub async fn resolve_pair(&self, first: &str, second: &str) -> Result<PairResolution> {
        ensure_not_blank(first)?;
        ensure_not_blank(second)?;
        let query = format!(
            "SELECT ?actor1 ?actor2 WHERE {{ OPTIONAL {{ {} }} OPTIONAL {{ {} }} }} LIMIT 1",
            self.name_clause("actor1", "film1", first),
            self.name_clause("actor2", "film2", second),
        );
        log::debug!("{}", query);

        let rows = self.oracle.select(&query).await?;
        let row = rows.first();
        let source = row.and_then(|r| value(r, "actor1")).map(EntityId::new);
        let target = row.and_then(|r| value(r, "actor2")).map(EntityId::new);

        match (source, target) {
            (Some(source), Some(target)) => {
                log::info!("Resolved {:?} to {} and {:?} to {}", first, source, second, target);
                Ok(PairResolution::Resolved { source, target })
            }
            (source, target) => {
                let mut missing = Vec::new();
                for (position, name, found) in [(1, first, source), (2, second, target)] {
                    if found.is_none() {
                        missing.push(UnresolvedName {
                            position,
                            name: name.to_string(),
                            suggestions: self.suggestions(name).await?,
                        });
                    }
                }
                Ok(PairResolution::Unresolved(missing))
            }
        }
    }

    /// Names of cast-credited entities that contain the search token of `name`.
    pub async fn suggestions(&self, name: &str) -> Result<Vec<String>> {
        ensure_not_blank(name)?;
        let token = search_token(name, self.precision);
        let query = format!(
            "SELECT DISTINCT ?actor_name WHERE {{ ?actor foaf:name ?actor_name. \
             ?film dbpo:starring ?actor. FILTER regex(?actor_name, {}, 'i') }}",
            term::literal_regex(&token)
        );
        log::debug!("{}", query);

        let rows = self.oracle.select(&query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| value(row, "actor_name"))
            .map(str::to_string)
            .collect())
    }
}
