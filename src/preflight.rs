use std::path::Path;

use crate::error::{Error, Result};
use crate::gitio;

/// Refuses to start unless the template, the source checkout and its branch
/// are where a run expects them. Nothing is read or written before this passes.
pub fn check(output: &Path, source_repo: &Path, branch: &str) -> Result<()> {
  if !output.is_file() {
    return Err(Error::Environment(format!(
      "{} doesn't exist. You should run this from the directory that contains it",
      output.display()
    )));
  }

  if !source_repo.is_dir() {
    return Err(Error::Environment(format!(
      "{} needs to be a git repo with curl's source code. You can clone it with\n\n\
       git clone https://github.com/curl/curl {}",
      source_repo.display(),
      source_repo.display()
    )));
  }

  let current = gitio::current_branch(source_repo)
    .map_err(|e| Error::Environment(format!("cannot read the branch of {}: {}", source_repo.display(), e)))?;
  match current {
    Some(ref name) if name == branch => Ok(()),
    Some(name) => Err(Error::Environment(format!(
      "{} is on branch {:?}, check out {:?} first",
      source_repo.display(),
      name,
      branch
    ))),
    None => Err(Error::Environment(format!(
      "{} has a detached HEAD, check out {:?} first",
      source_repo.display(),
      branch
    ))),
  }
}
