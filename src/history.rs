use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::extract::Extractor;
use crate::gitio;
use crate::model::Snapshot;
use crate::util::{iso_utc, short_sha};

/// The first commit in curl's git repo (from 1999) defines the options in
/// src/main.c; 49b79b76316248d5233d08006234933913faaa3b moved them to
/// src/tool_getparam.c.
pub const FILENAMES: [&str; 2] = ["src/main.c", "src/tool_getparam.c"];

/// The option table as it was after every commit that touched one of
/// `filenames`, files taken in the given order, each oldest first.
pub fn explicit_aliases_over_time(
  repo: &Path,
  filenames: &[&str],
  extractor: &mut Extractor,
) -> Result<Vec<Snapshot>> {
  let mut snapshots = Vec::new();
  for filename in filenames {
    let commits = gitio::commits_that_changed(repo, filename)?;
    info!(file = %filename, commits = commits.len(), "reading option tables");

    for commit in commits {
      let contents = gitio::file_at(repo, &commit.hash, filename)?;
      let snapshot = extractor.snapshot(commit, filename, &contents)?;
      debug!(
        commit = %short_sha(&snapshot.commit.hash),
        date = %iso_utc(snapshot.commit.timestamp),
        options = snapshot.aliases.len(),
        "extracted"
      );
      snapshots.push(snapshot);
    }
  }
  Ok(snapshots)
}
