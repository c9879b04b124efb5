use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "CASTCHAIN_CONFIG";

/// Config file looked up in the current directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "castchain.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// SPARQL endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sent as `default-graph-uri`; omitted when empty.
    #[serde(default = "default_graph")]
    pub default_graph: String,
    /// HTTP timeout. Unset keeps the client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// IRIs under this namespace are shortened to `:Name` when printed.
    #[serde(default = "default_display_namespace")]
    pub display_namespace: String,
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<PrefixDecl>,
}

/// One `PREFIX name: <iri>` line of the prefix block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PrefixDecl {
    pub name: String,
    pub iri: String,
}

impl PrefixDecl {
    fn new(name: &str, iri: &str) -> Self {
        Self {
            name: name.to_string(),
            iri: iri.to_string(),
        }
    }
}

/// Path search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Deepest hypothesis tried before giving up.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Rows requested per depth; values below 1 mean "all".
    #[serde(default = "default_alternatives")]
    pub alternatives: i64,
    /// Characters used for the suggestion token of single-word names.
    #[serde(default = "default_suggestion_precision")]
    pub suggestion_precision: usize,
    #[serde(default = "default_name_language")]
    pub name_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_endpoint() -> String {
    "http://dbpedia.org/sparql".to_string()
}

fn default_graph() -> String {
    "http://dbpedia.org".to_string()
}

fn default_display_namespace() -> String {
    "http://dbpedia.org/resource/".to_string()
}

fn default_prefixes() -> Vec<PrefixDecl> {
    vec![
        PrefixDecl::new("owl", "http://www.w3.org/2002/07/owl#"),
        PrefixDecl::new("xsd", "http://www.w3.org/2001/XMLSchema#"),
        PrefixDecl::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
        PrefixDecl::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
        PrefixDecl::new("foaf", "http://xmlns.com/foaf/0.1/"),
        PrefixDecl::new("dc", "http://purl.org/dc/elements/1.1/"),
        PrefixDecl::new("", "http://dbpedia.org/resource/"),
        PrefixDecl::new("dbpedia2", "http://dbpedia.org/property/"),
        PrefixDecl::new("dbpedia", "http://dbpedia.org/"),
        PrefixDecl::new("skos", "http://www.w3.org/2004/02/skos/core#"),
        PrefixDecl::new("dbpo", "http://dbpedia.org/ontology/"),
    ]
}

fn default_max_depth() -> usize {
    10
}

fn default_alternatives() -> i64 {
    1
}

fn default_suggestion_precision() -> usize {
    4
}

fn default_name_language() -> String {
    "en".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            default_graph: default_graph(),
            timeout_secs: None,
            display_namespace: default_display_namespace(),
            prefixes: default_prefixes(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            alternatives: default_alternatives(),
            suggestion_precision: default_suggestion_precision(),
            name_language: default_name_language(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl OracleConfig {
    /// Render the `PREFIX` block prepended to every query body.
    pub fn prefix_block(&self) -> String {
        self.prefixes
            .iter()
            .map(|p| format!("PREFIX {}: <{}>\n", p.name, p.iri))
            .collect()
    }
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in CASTCHAIN_CONFIG environment variable
    /// 2. ./castchain.toml in current directory
    ///
    /// An explicit path must exist. A missing ./castchain.toml falls back to defaults.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let explicit = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        Self::load_from(explicit.as_deref())
    }

    /// Load configuration from `path`, or from ./castchain.toml when `None`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read(default_path)?
                } else {
                    log::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Config::default()
                }
            }
        };

        config.validate()?;

        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.oracle.endpoint).with_context(|| {
            format!("oracle.endpoint is not a valid URL: {}", self.oracle.endpoint)
        })?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!("oracle.endpoint must be an http(s) URL, got {}", endpoint.scheme());
        }

        if self.search.max_depth == 0 {
            anyhow::bail!("search.max_depth must be greater than 0");
        }

        if self.search.suggestion_precision == 0 {
            anyhow::bail!("search.suggestion_precision must be greater than 0");
        }

        if self.search.name_language.trim().is_empty() {
            anyhow::bail!("search.name_language must not be empty");
        }

        Ok(())
    }
}
