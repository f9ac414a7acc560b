// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse one revision of the C `aliases[]` struct literal into alias records
// role: parsing/extraction
// inputs: raw source text of src/main.c or src/tool_getparam.c
// outputs: Vec<AliasRecord> in source order, deduplicated by long name
// invariants:
// - a repeated long name keeps its first position and takes the later values
// - a repeated long name with differing values is warned about once per Extractor, not per occurrence
// errors: unknown type tags, bad letter lengths, malformed entries, and an empty table are fatal
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{AliasRecord, ArgDesc, CommitMeta, Snapshot};

pub const OPTS_START: &str = "struct LongShort aliases[]= {";
pub const OPTS_END: &str = "};";

/// Parses option tables, remembering which long names were already reported
/// as repeated so a run warns about each of them only once.
#[derive(Debug, Default)]
pub struct Extractor {
  warned_repeats: HashSet<String>,
}

impl Extractor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn warned(&self) -> &HashSet<String> {
    &self.warned_repeats
  }

  /// Extracts a snapshot, failing if no option entries were found.
  pub fn snapshot(&mut self, commit: CommitMeta, filename: &str, contents: &str) -> Result<Snapshot> {
    let aliases = self.aliases(contents)?;
    if aliases.is_empty() {
      return Err(Error::NoAliases { commit: commit.hash, filename: filename.to_string() });
    }
    Ok(Snapshot { commit, aliases })
  }

  pub fn aliases(&mut self, contents: &str) -> Result<Vec<AliasRecord>> {
    let mut lines = contents.lines();
    for line in lines.by_ref() {
      if line.contains(OPTS_START) {
        break;
      }
    }

    let mut aliases: Vec<AliasRecord> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for line in lines {
      let line = line.trim();
      if line.ends_with(OPTS_END) {
        break;
      }
      if !line.starts_with('{') {
        continue;
      }

      let alias = parse_entry(line)?;
      match position.get(&alias.lname) {
        Some(&idx) => {
          if aliases[idx] != alias && self.warned_repeats.insert(alias.lname.clone()) {
            warn!(
              lname = %alias.lname,
              "repeated with different values: {:?} vs. {:?}",
              aliases[idx],
              alias
            );
          }
          aliases[idx] = alias;
        }
        None => {
          position.insert(alias.lname.clone(), aliases.len());
          aliases.push(alias);
        }
      }
    }

    Ok(aliases)
  }
}

/// Splits `{"v", "verbose", ARG_BOOL},` into a record. main.c had comments on
/// the same line, those are dropped.
pub fn parse_entry(line: &str) -> Result<AliasRecord> {
  let body = line.split("/*").next().unwrap_or("").trim();
  let body = body.trim_matches(&['{', '}', ','][..]);
  let fields: Vec<&str> = body.split(',').collect();
  if fields.len() != 3 {
    return Err(Error::Parse {
      line: line.to_string(),
      reason: format!("expected 3 comma separated fields, found {}", fields.len()),
    });
  }

  let letter = unquote(fields[0]);
  let lname = unquote(fields[1]);
  let desc: ArgDesc = fields[2].trim().parse()?;

  let len = letter.chars().count();
  if !(1..=2).contains(&len) {
    return Err(Error::BadLetter { lname: lname.to_string(), letter: letter.to_string() });
  }

  Ok(AliasRecord::new(letter, lname, desc))
}

fn unquote(field: &str) -> &str {
  field.trim().trim_matches('"')
}
