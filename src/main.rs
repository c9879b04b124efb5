use anyhow::Result;
use castchain::genealogy::{render_paths, RenderOptions, ResolvedPath, UnresolvedName};
use castchain::{Config, EntityId, Genealogy, GenealogyFinder, SparqlClient};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "castchain")]
#[command(version)]
#[command(about = "Find how two actors are connected through the films they starred in")]
struct Args {
    /// Name of the first actor
    #[arg(default_value = "Orson Welles")]
    actor1: String,

    /// Name of the second actor
    #[arg(default_value = "Jack Nicholson")]
    actor2: String,

    /// Paths to report at the matching depth; below 1 reports all of them
    #[arg(allow_negative_numbers = true)]
    alternatives: Option<i64>,

    /// Longest path (in films) to try before giving up
    #[arg(long)]
    max_depth: Option<usize>,

    /// SPARQL endpoint to query
    #[arg(long)]
    endpoint: Option<String>,

    /// Print full IRIs instead of `:Name`
    #[arg(long)]
    full_iris: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to $CASTCHAIN_CONFIG or ./castchain.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let _ = dotenv::dotenv();
            Config::load_from(Some(path.as_path()))?
        }
        None => Config::load()?,
    };

    if let Some(max_depth) = args.max_depth {
        config.search.max_depth = max_depth;
    }
    if let Some(endpoint) = &args.endpoint {
        config.oracle.endpoint = endpoint.clone();
    }
    config.validate()?;

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = load_config(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.logging.log_level.as_str())
    ).init();

    log::debug!("Endpoint: {}", config.oracle.endpoint);
    log::debug!("Max depth: {}", config.search.max_depth);

    let alternatives = args.alternatives.unwrap_or(config.search.alternatives);
    let client = SparqlClient::new(&config.oracle)?;
    let finder = GenealogyFinder::new(client, config.search.clone());

    let genealogy = finder.find(&args.actor1, &args.actor2, alternatives).await?;

    let status = report(&genealogy, &args, &config, &mut std::io::stdout().lock())?;
    Ok(ExitCode::from(status))
}

/// Print the outcome and return the process exit status: 1 when a name did not
/// resolve, 0 otherwise.
fn report(
    genealogy: &Genealogy,
    args: &Args,
    config: &Config,
    out: &mut impl Write,
) -> Result<u8> {
    match genealogy {
        Genealogy::Unresolved(missing) => {
            write_unresolved(missing, out)?;
            return Ok(1);
        }
        Genealogy::Found {
            source,
            target,
            depth,
            paths,
        } => {
            log::debug!("Shortest connection uses {} film(s)", depth);
            if args.json {
                writeln!(out, "{}", to_json(source, target, Some(*depth), paths)?)?;
            } else {
                let options = if args.full_iris {
                    RenderOptions::default()
                } else {
                    RenderOptions::abbreviated(config.oracle.display_namespace.as_str())
                };
                write!(out, "{}", render_paths(paths, &options))?;
            }
        }
        Genealogy::NotFound { source, target } => {
            if args.json {
                writeln!(out, "{}", to_json(source, target, None, &[])?)?;
            } else {
                writeln!(out, "Unable to find any direct genealogy")?;
            }
        }
    }

    Ok(0)
}

fn write_unresolved(missing: &[UnresolvedName], out: &mut impl Write) -> std::io::Result<()> {
    for name in missing {
        writeln!(out, "Unable to find \"{}\".", name.name)?;
        if name.suggestions.is_empty() {
            writeln!(out, "The knowledge graph does not recognize {}", name.name)?;
        } else {
            writeln!(out, "Maybe you were looking for...")?;
            for suggestion in &name.suggestions {
                writeln!(out, "{}", suggestion)?;
            }
        }
    }
    Ok(())
}

fn to_json(
    source: &EntityId,
    target: &EntityId,
    depth: Option<usize>,
    paths: &[ResolvedPath],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "source": source,
        "target": target,
        "depth": depth,
        "paths": paths,
    }))
}
