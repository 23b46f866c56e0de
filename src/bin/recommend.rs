//! Command-line front end for the waste recommender
//!
//! Usage:
//!   recommend <catalogue.csv> <query...> [--json] [--cutoff X] [--config file.json]
//!             [--seed N] [--summary]
//!
//! Set RUST_LOG=debug to trace each query through the pipeline.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use waste_recommender::{
    Catalogue, CatalogueSummary, JsonFormatter, Recommender, RecommenderConfig, TextFormatter,
};

struct Args {
    catalogue: PathBuf,
    query: String,
    json: bool,
    summary: bool,
    cutoff: Option<f64>,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut json = false;
    let mut summary = false;
    let mut cutoff = None;
    let mut seed = None;
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--summary" => summary = true,
            "--cutoff" => {
                let value = args.next().context("--cutoff needs a value")?;
                cutoff = Some(value.parse().with_context(|| format!("bad cutoff '{}'", value))?);
            }
            "--seed" => {
                let value = args.next().context("--seed needs a value")?;
                seed = Some(value.parse().with_context(|| format!("bad seed '{}'", value))?);
            }
            "--config" => {
                config = Some(PathBuf::from(args.next().context("--config needs a path")?));
            }
            flag if flag.starts_with("--") => bail!("unknown flag {}", flag),
            _ => positional.push(arg),
        }
    }

    if positional.is_empty() {
        bail!("usage: recommend <catalogue.csv> <query...> [--json] [--cutoff X] [--config file.json] [--seed N] [--summary]");
    }
    let catalogue = PathBuf::from(positional.remove(0));
    let query = positional.join(" ");
    if query.trim().is_empty() && !summary {
        bail!("missing query (or pass --summary)");
    }

    Ok(Args {
        catalogue,
        query,
        json,
        summary,
        cutoff,
        seed,
        config,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => RecommenderConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => RecommenderConfig::default(),
    };
    config.catalogue_path = Some(args.catalogue.clone());
    if let Some(cutoff) = args.cutoff {
        config.matcher.cutoff = cutoff;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let catalogue = Catalogue::load(&args.catalogue)
        .with_context(|| format!("Failed to load catalogue {:?}", args.catalogue))?;

    if args.summary {
        println!("{}", CatalogueSummary::from_catalogue(&catalogue).to_text());
    }

    let recommender = Recommender::new(catalogue, config).context("Invalid configuration")?;

    if args.query.trim().is_empty() {
        return Ok(());
    }

    let outcome = recommender
        .recommend(&args.query)
        .with_context(|| format!("Failed to score '{}'", args.query))?;

    if args.json {
        println!("{}", JsonFormatter::format(&outcome)?);
    } else {
        println!("{}", TextFormatter::format_outcome(&outcome));
    }

    Ok(())
}
