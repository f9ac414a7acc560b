use std::path::Path;

use crate::error::{Error, Result};
use crate::model::CommitMeta;
use crate::util::{decode_with_fallback, run_git, run_git_bytes};

/// Every commit that touched `filename` (deletions excluded), oldest first.
pub fn commits_that_changed(repo: &Path, filename: &str) -> Result<Vec<CommitMeta>> {
    let args: Vec<String> = vec![
        "log".into(),
        "--diff-filter=d".into(),
        "--date-order".into(),
        "--reverse".into(),
        "--format=%H %at".into(),
        "--date=iso-strict".into(),
        "--".into(),
        filename.into(),
    ];
    let out = run_git(repo, &args)?;
    parse_commit_lines(&out)
}

pub fn parse_commit_lines(out: &str) -> Result<Vec<CommitMeta>> {
    let mut commits = Vec::new();
    for line in out.lines() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let mut parts = line.split_whitespace();
        let (hash, ts) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(t), None) => (h, t),
            _ => return Err(Error::Parse { line: line.to_string(), reason: "expected \"<hash> <timestamp>\"".into() }),
        };
        let timestamp: i64 = ts.parse().map_err(|_| Error::Parse {
            line: line.to_string(),
            reason: format!("bad author timestamp {:?}", ts),
        })?;
        commits.push(CommitMeta { hash: hash.to_string(), timestamp });
    }
    Ok(commits)
}

/// Contents of `filename` as of `commit`.
pub fn file_at(repo: &Path, commit: &str, filename: &str) -> Result<String> {
    let args: Vec<String> = vec!["cat-file".into(), "-p".into(), format!("{}:{}", commit, filename)];
    let bytes = run_git_bytes(repo, &args)?;
    Ok(decode_with_fallback(bytes))
}

pub fn current_branch(repo: &Path) -> Result<Option<String>> {
    let out = run_git(repo, &vec!["rev-parse".into(), "--abbrev-ref".into(), "HEAD".into()])?;
    let name = out.trim();
    if name == "HEAD" { Ok(None) } else { Ok(Some(name.to_string())) }
}
