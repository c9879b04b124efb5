//! Query synthesis for one path-length hypothesis.
//!
//! A depth-`d` hypothesis chains `d` films between `d + 1` actor slots:
//!
//! ```text
//! ?film0 dbpo:starring <source> . ?film0 dbpo:starring ?actor1 .
//! ?film1 dbpo:starring ?actor1 .  ?film1 dbpo:starring <target> .
//! ```
//!
//! Slots are typed values, so the endpoints are placed by position and can never
//! clash with a free variable whose index shares a textual prefix (`?actor1`
//! vs `?actor10`).

use std::fmt;

use crate::error::{CastchainError, Result};
use crate::genealogy::EntityId;
use crate::sparql::term;

/// Predicate linking a film to a cast member.
pub const STARRING: &str = "dbpo:starring";

/// Variable name of the `index`-th actor slot.
pub fn actor_var(index: usize) -> String {
    format!("actor{}", index)
}

/// Variable name of the `index`-th film slot.
pub fn film_var(index: usize) -> String {
    format!("film{}", index)
}

/// Turn the user-facing `alternatives` count into a row cap; below 1 means no cap.
pub fn row_limit(alternatives: i64) -> Option<usize> {
    if alternatives >= 1 {
        usize::try_from(alternatives).ok()
    } else {
        None
    }
}

/// A position in a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A fixed node, rendered as `<iri>`.
    Iri(EntityId),
    /// A free variable, rendered as `?name`.
    Var(String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // IRIs are checked when the hypothesis is built.
            Term::Iri(id) => write!(f, "<{}>", id.as_str()),
            Term::Var(name) => write!(f, "?{}", name),
        }
    }
}

/// `subject predicate object .`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Term,
    pub predicate: &'static str,
    pub object: Term,
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}.", self.subject, self.predicate, self.object)
    }
}

/// The query for one depth of the search.
#[derive(Debug, Clone)]
pub struct PathHypothesis {
    patterns: Vec<TriplePattern>,
    limit: Option<usize>,
}

impl PathHypothesis {
    pub fn new(
        depth: usize,
        source: &EntityId,
        target: &EntityId,
        alternatives: i64,
    ) -> Result<Self> {
        if depth == 0 {
            return Err(CastchainError::InvalidInput(
                "path depth must be at least 1".to_string(),
            ));
        }
        term::iri(source.as_str())?;
        term::iri(target.as_str())?;

        let actor = |k: usize| -> Term {
            if k == 0 {
                Term::Iri(source.clone())
            } else if k == depth {
                Term::Iri(target.clone())
            } else {
                Term::Var(actor_var(k))
            }
        };

        let mut patterns = Vec::with_capacity(depth * 2);
        for k in 0..depth {
            let film = Term::Var(film_var(k));
            patterns.push(TriplePattern {
                subject: film.clone(),
                predicate: STARRING,
                object: actor(k),
            });
            patterns.push(TriplePattern {
                subject: film,
                predicate: STARRING,
                object: actor(k + 1),
            });
        }

        Ok(Self {
            patterns,
            limit: row_limit(alternatives),
        })
    }

    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    /// Render the `SELECT` body.
    pub fn to_query(&self) -> String {
        let lines = self
            .patterns
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        match self.limit {
            Some(limit) => format!("SELECT * WHERE {{{}}} LIMIT {}", lines, limit),
            None => format!("SELECT * WHERE {{{}}}", lines),
        }
    }
}

/// Query body for a depth-`depth` path from `source` to `target`.
pub fn generate(
    depth: usize,
    source: &EntityId,
    target: &EntityId,
    alternatives: i64,
) -> Result<String> {
    Ok(PathHypothesis::new(depth, source, target, alternatives)?.to_query())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "http://dbpedia.org/resource/Orson_Welles";
    const TARGET: &str = "http://dbpedia.org/resource/Jack_Nicholson";

    fn ids() -> (EntityId, EntityId) {
        (EntityId::new(SOURCE), EntityId::new(TARGET))
    }

    fn count_token(query: &str, token: &str) -> usize {
        query
            .split_whitespace()
            .map(|t| t.trim_matches(|c| c == '.' || c == '{' || c == '}'))
            .filter(|t| *t == token)
            .count()
    }

    #[test]
    fn test_depth_one() {
        let (s, t) = ids();
        let query = generate(1, &s, &t, 1).unwrap();
        assert_eq!(
            query,
            format!(
                "SELECT * WHERE {{?film0 dbpo:starring <{}>. ?film0 dbpo:starring <{}>.}} LIMIT 1",
                SOURCE, TARGET
            )
        );
        assert!(!query.contains("?actor"));
    }

    #[test]
    fn test_depth_two_has_one_free_actor() {
        let (s, t) = ids();
        let query = generate(2, &s, &t, 0).unwrap();
        assert_eq!(
            query,
            format!(
                "SELECT * WHERE {{?film0 dbpo:starring <{}>. ?film0 dbpo:starring ?actor1. \
                 ?film1 dbpo:starring ?actor1. ?film1 dbpo:starring <{}>.}}",
                SOURCE, TARGET
            )
        );
    }

    #[test]
    fn test_slot_counts_for_every_depth() {
        let (s, t) = ids();
        for depth in 1..=15 {
            let hypothesis = PathHypothesis::new(depth, &s, &t, 1).unwrap();
            let query = hypothesis.to_query();

            assert_eq!(hypothesis.patterns().len(), depth * 2);
            for k in 0..depth {
                // each film slot joins exactly two patterns
                assert_eq!(count_token(&query, &format!("?film{}", k)), 2, "depth {}", depth);
            }
            assert_eq!(count_token(&query, &format!("?film{}", depth)), 0);

            for k in 1..depth {
                assert_eq!(count_token(&query, &format!("?actor{}", k)), 2, "depth {}", depth);
            }
            assert_eq!(count_token(&query, "?actor0"), 0);
            assert_eq!(count_token(&query, &format!("?actor{}", depth)), 0);

            let patterns = hypothesis.patterns();
            assert_eq!(patterns[0].object, Term::Iri(s.clone()));
            assert_eq!(patterns[patterns.len() - 1].object, Term::Iri(t.clone()));
            assert_eq!(count_token(&query, &format!("<{}>", SOURCE)), 1);
            assert_eq!(count_token(&query, &format!("<{}>", TARGET)), 1);
        }
    }

    #[test]
    fn test_endpoints_survive_double_digit_depth() {
        let s = EntityId::new("X");
        let t = EntityId::new("Y");
        for depth in [10, 11, 12, 20] {
            let hypothesis = PathHypothesis::new(depth, &s, &t, 1).unwrap();
            let patterns = hypothesis.patterns();

            assert_eq!(patterns[0].object, Term::Iri(s.clone()));
            assert_eq!(patterns[patterns.len() - 1].object, Term::Iri(t.clone()));
            assert_eq!(patterns[1].object, Term::Var("actor1".to_string()));
            assert_eq!(
                patterns[patterns.len() - 2].object,
                Term::Var(format!("actor{}", depth - 1))
            );

            let query = hypothesis.to_query();
            assert!(query.starts_with(
                "SELECT * WHERE {?film0 dbpo:starring <X>. ?film0 dbpo:starring ?actor1."
            ));
            assert!(query.contains(&format!(
                "?film{d} dbpo:starring ?actor{d}. ?film{d} dbpo:starring <Y>.",
                d = depth - 1
            )));
            assert!(query.contains("?actor10") == (depth > 10));
            assert_eq!(query.matches("<X>").count(), 1);
            assert_eq!(query.matches("<Y>").count(), 1);
        }
    }

    #[test]
    fn test_alternatives_limit() {
        let (s, t) = ids();
        assert!(generate(3, &s, &t, 5).unwrap().ends_with(".} LIMIT 5"));
        assert!(generate(3, &s, &t, 0).unwrap().ends_with(".}"));
        assert!(generate(3, &s, &t, -2).unwrap().ends_with(".}"));
        assert_eq!(row_limit(1), Some(1));
        assert_eq!(row_limit(0), None);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let (s, t) = ids();
        assert!(matches!(
            generate(0, &s, &t, 1),
            Err(CastchainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unsafe_iri_rejected() {
        let s = EntityId::new("http://x/a> ?x ?y <http://x/b");
        let t = EntityId::new(TARGET);
        assert!(PathHypothesis::new(1, &s, &t, 1).is_err());
    }
}
