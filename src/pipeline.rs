// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate a run: preflight, extract (or load cached) history, normalize, reconcile, emit
// role: processing/orchestrator
// inputs: EffectiveConfig
// outputs: rewritten template file, or the table / JSON on stdout
// side_effects: Runs git; reads and writes the cache; rewrites the template; prints to stdout
// invariants:
// - preflight passes before any git call or file write
// - normalization and reconciliation always re-run, even on a cache hit
// errors: every failure is fatal and propagated with context; nothing is retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cache;
use crate::cli::{EffectiveConfig, OutputMode};
use crate::extract::Extractor;
use crate::history::{self, FILENAMES};
use crate::model::{OptionTable, Snapshot};
use crate::normalize::Normalizer;
use crate::preflight;
use crate::reconcile::find_deleted;
use crate::render;

/// Normalizes raw snapshots and works out every option's lifetime.
pub fn reconcile_history(raw: Vec<Snapshot>, normalizer: &Normalizer) -> crate::error::Result<OptionTable> {
  let timeline = normalizer.timeline(raw)?;
  find_deleted(&timeline)
}

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  let output = Path::new(&cfg.output);
  let repo = Path::new(&cfg.source_repo);
  preflight::check(output, repo, &cfg.branch)?;

  let mut extractor = Extractor::new();
  let raw = cache::load_or_compute(cfg.cache.as_deref().map(Path::new), cfg.refresh_cache, || {
    history::explicit_aliases_over_time(repo, &FILENAMES, &mut extractor)
  })
  .with_context(|| format!("collecting option history from {}", cfg.source_repo))?;

  let table = reconcile_history(raw, &Normalizer::default()).context("reconciling option history")?;
  info!(long = table.long.len(), short = table.short.len(), "reconciled options");

  match cfg.mode {
    OutputMode::Template => {
      render::write_into_template(output, &table).with_context(|| format!("writing {}", cfg.output))?;
      info!(file = %cfg.output, "updated generated options");
    }
    OutputMode::Stdout => {
      for line in render::format_as_js(&table) {
        println!("{}", line);
      }
    }
    OutputMode::Json => {
      println!("{}", serde_json::to_string_pretty(&table)?);
    }
  }
  Ok(())
}
