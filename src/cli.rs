use anyhow::{bail, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "curl-option-history",
    version,
    about = "Rebuild the history of curl's command line options from git and splice it into a JS table",
    long_about = None
)]
pub struct Cli {
  /// Template file holding the BEGIN/END GENERATED CURL OPTIONS sentinels
  #[arg(long, default_value = "./resources/js/curl-to-go.js")]
  pub output: PathBuf,

  /// Checkout of curl's source code
  #[arg(long, default_value = "../curl")]
  pub source_repo: PathBuf,

  /// Branch the checkout must be on
  #[arg(long, default_value = "master")]
  pub branch: String,

  /// Where extracted option tables are cached between runs
  #[arg(long, default_value = "curl_params.json")]
  pub cache: PathBuf,

  /// Neither read nor write the cache
  #[arg(long)]
  pub no_cache: bool,

  /// Walk git history again and overwrite the cache
  #[arg(long)]
  pub refresh_cache: bool,

  /// Print the generated table instead of rewriting the template
  #[arg(long)]
  pub stdout: bool,

  /// Print the reconciled options as JSON instead of rewriting the template
  #[arg(long)]
  pub json: bool,

  /// Log per-commit details and identity conflicts
  #[arg(short, long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
  Template,
  Stdout,
  Json,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub output: String,
  pub source_repo: String, // absolute path for stability
  pub branch: String,
  pub cache: Option<String>,
  pub refresh_cache: bool,
  pub mode: OutputMode,
  pub verbose: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let mode = match (cli.stdout, cli.json) {
    (false, false) => OutputMode::Template,
    (true, false) => OutputMode::Stdout,
    (false, true) => OutputMode::Json,
    (true, true) => bail!("Choose only one of --stdout | --json"),
  };

  if cli.no_cache && cli.refresh_cache {
    bail!("--refresh-cache writes the cache; it cannot be combined with --no-cache");
  }

  Ok(EffectiveConfig {
    output: cli.output.to_string_lossy().to_string(),
    source_repo: util::canonicalize_lossy(&cli.source_repo),
    branch: cli.branch,
    cache: if cli.no_cache { None } else { Some(cli.cache.to_string_lossy().to_string()) },
    refresh_cache: cli.refresh_cache,
    mode,
    verbose: cli.verbose,
  })
}
