pub mod config;
pub mod error;
pub mod genealogy;
pub mod sparql;

pub use config::Config;
pub use error::{CastchainError, Result};
pub use genealogy::{EntityId, Genealogy, GenealogyFinder};
pub use sparql::{Oracle, SparqlClient};
