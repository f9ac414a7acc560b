// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for git subprocesses, text decoding, paths, time formatting, and man page rendering
// role: utilities/helpers
// inputs: repo paths, git argument vectors, raw bytes, epochs, clap CommandFactory
// outputs: subprocess stdout, decoded text, canonicalized paths, formatted timestamps, man page text
// side_effects: run_git/run_git_bytes invoke subprocesses
// invariants:
// - decode_with_fallback never fails; non-UTF-8 input is read as Latin-1 byte for byte
// - run_git surfaces the argument vector and stderr on failure
// errors: git failures become Error::Git; spawn failures become Error::Io
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{SecondsFormat, TimeZone, Utc};
use clap::CommandFactory;

use crate::error::{Error, Result};

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Runs git in `repo` and returns raw stdout.
pub fn run_git_bytes(repo: &Path, args: &[String]) -> Result<Vec<u8>> {
  let out = Command::new("git").args(args).current_dir(repo).output()?;

  if out.status.success() {
    Ok(out.stdout)
  } else {
    Err(Error::Git {
      args: args.to_vec(),
      stderr: String::from_utf8_lossy(&out.stderr).to_string(),
    })
  }
}

pub fn run_git(repo: &Path, args: &[String]) -> Result<String> {
  let out = run_git_bytes(repo, args)?;
  Ok(String::from_utf8_lossy(&out).to_string())
}

/// Decodes file contents as UTF-8, reading them as Latin-1 when that fails.
pub fn decode_with_fallback(bytes: Vec<u8>) -> String {
  match String::from_utf8(bytes) {
    Ok(s) => s,
    Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
  }
}

/// Generates a short 12-character SHA from a full one.
pub fn short_sha(full: &str) -> String {
  full.chars().take(12).collect()
}

/// Formats a Unix epoch timestamp as an RFC3339 UTC string.
pub fn iso_utc(epoch: i64) -> String {
  match Utc.timestamp_opt(epoch, 0).single() {
    Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    None => epoch.to_string(),
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
