//! Raw path rows to ordered actor/film hops.

use serde::Serialize;

use crate::error::{CastchainError, Result};
use crate::genealogy::hypothesis::{actor_var, film_var};
use crate::genealogy::EntityId;
use crate::sparql::{value, Row};

/// `from` and `to` both appear in the cast of `film`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub from: EntityId,
    pub film: EntityId,
    pub to: EntityId,
}

/// A chain of hops from the source actor to the target actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPath {
    pub hops: Vec<Hop>,
}

impl ResolvedPath {
    pub fn depth(&self) -> usize {
        self.hops.len()
    }

    /// Actors along the path, source first and target last.
    pub fn actors(&self) -> Vec<&EntityId> {
        let mut actors: Vec<&EntityId> = self.hops.iter().map(|h| &h.from).collect();
        if let Some(last) = self.hops.last() {
            actors.push(&last.to);
        }
        actors
    }

    pub fn films(&self) -> Vec<&EntityId> {
        self.hops.iter().map(|h| &h.film).collect()
    }
}

/// Number of hops encoded in `row`, counted from its contiguous `film0..` slots.
pub fn row_depth(row: &Row) -> usize {
    (0..).take_while(|k| row.contains_key(&film_var(*k))).count()
}

/// Rebuild each row as a path from `source` to `target`.
pub fn normalize(rows: &[Row], source: &EntityId, target: &EntityId) -> Result<Vec<ResolvedPath>> {
    rows.iter().map(|row| normalize_row(row, source, target)).collect()
}

fn normalize_row(row: &Row, source: &EntityId, target: &EntityId) -> Result<ResolvedPath> {
    let depth = row_depth(row);
    if depth == 0 {
        return Err(CastchainError::Decode(format!(
            "path row has no {} slot",
            film_var(0)
        )));
    }

    let mut actors = Vec::with_capacity(depth + 1);
    actors.push(source.clone());
    for k in 1..depth {
        let var = actor_var(k);
        let actor = value(row, &var)
            .ok_or_else(|| CastchainError::Decode(format!("path row is missing {}", var)))?;
        actors.push(EntityId::new(actor));
    }
    actors.push(target.clone());

    let hops = (0..depth)
        .map(|k| Hop {
            from: actors[k].clone(),
            // row_depth guarantees film0..depth-1 exist
            film: EntityId::new(value(row, &film_var(k)).unwrap_or_default()),
            to: actors[k + 1].clone(),
        })
        .collect();

    Ok(ResolvedPath { hops })
}
