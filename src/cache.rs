// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Persist the extracted (pre-normalization) snapshots so repeated runs skip hundreds of git round trips
// role: persistence/cache
// inputs: cache path, refresh flag, a closure that walks git history
// outputs: Vec<Snapshot> from disk or freshly computed
// side_effects: Reads and writes the cache file
// invariants: only raw extraction output is cached; normalization always re-runs
// errors: unreadable or corrupt cache files are fatal (delete the file to rebuild)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::model::Snapshot;

pub fn load(path: &Path) -> Result<Option<Vec<Snapshot>>> {
  if !path.is_file() {
    return Ok(None);
  }
  let bytes = std::fs::read(path)?;
  Ok(Some(serde_json::from_slice(&bytes)?))
}

pub fn store(path: &Path, snapshots: &[Snapshot]) -> Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, serde_json::to_vec(snapshots)?)?;
  Ok(())
}

/// Reads `path` when present (unless `refresh`), otherwise computes the
/// snapshots and writes them there. With no path nothing touches the disk.
pub fn load_or_compute<F>(path: Option<&Path>, refresh: bool, compute: F) -> Result<Vec<Snapshot>>
where
  F: FnOnce() -> Result<Vec<Snapshot>>,
{
  let Some(path) = path else {
    return compute();
  };

  if !refresh {
    if let Some(snapshots) = load(path)? {
      info!(cache = %path.display(), snapshots = snapshots.len(), "using cached option history");
      return Ok(snapshots);
    }
  }

  let snapshots = compute()?;
  store(path, &snapshots)?;
  info!(cache = %path.display(), snapshots = snapshots.len(), "wrote option history cache");
  Ok(snapshots)
}
