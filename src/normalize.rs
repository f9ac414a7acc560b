// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Rewrite each snapshot's alias records so the same option looks the same across 25 years of source changes
// role: normalization
// inputs: raw snapshots from extraction (or the cache), in commit order
// outputs: snapshots whose records carry canonical names, the 2-state type vocabulary, and synthesized --no-OPTION siblings
// invariants:
// - stages run in fixed order: names, types, letter grouping, negation, special cases
// - the override tables are data, not inferred; special cases run last and win
// errors: an unregistered letter collision aborts the run
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{AliasRecord, ArgDesc, Snapshot};

/// Before this commit a `FALSE` option had no implicit `--no-OPTION` form.
pub const IMPLICIT_NO_COMMIT: &str = "5abfdc0140df0977b02506d16796f616158bfe88";

pub const NEGATION_PREFIXES: [&str; 2] = ["no-", "disable-"];

/// Long names sharing a short letter, sorted, and which of them is the real option.
pub static DUPES: &[(&[&str], &str)] = &[
  (&["krb", "krb4"], "krb"),
  (&["http-request", "request"], "request"),
  (&["ftp-ascii", "use-ascii"], "use-ascii"),
  (&["ftp-port", "ftpport"], "ftp-port"),
  (&["socks", "socks5"], "socks5"),
  (&["socks", "socks5ip"], "socks5"),
  (&["ftp-ssl", "ssl"], "ssl"),
  (&["ftp-ssl-reqd", "ssl-reqd"], "ssl-reqd"),
  (&["proxy-service-name", "socks5-gssapi-service"], "proxy-service-name"),
];

/// Forced canonical names; `None` removes whatever name was inferred.
pub static NAME_SPECIAL_CASES: Lazy<HashMap<&'static str, Option<&'static str>>> = Lazy::new(|| {
  HashMap::from([
    ("ftp-ssl", Some("ssl")),
    ("no-ftp-ssl", Some("ssl")),
    ("ftp-ssl-reqd", Some("ssl-reqd")),
    ("no-ftp-ssl-reqd", Some("ssl-reqd")),
    ("ftp-ascii", Some("use-ascii")),
    ("ftpport", Some("ftp-port")),
    ("krb4", Some("krb")),
    ("socks5-gssapi-service", Some("proxy-service-name")),
    ("socks5", None),
  ])
});

/// `--no-foo` and `--disable-foo` are the negated form of `foo`.
pub fn infer_names(mut aliases: Vec<AliasRecord>) -> Vec<AliasRecord> {
  for alias in aliases.iter_mut().filter(|a| a.desc.is_bool_like()) {
    for prefix in NEGATION_PREFIXES {
      if let Some(stripped) = alias.lname.strip_prefix(prefix) {
        alias.name = Some(stripped.to_string());
      }
    }
  }
  aliases
}

/// Collapses `TRUE`/`FALSE` and `ARG_FILENAME` onto `ARG_STRING`/`ARG_BOOL`/`ARG_NONE`.
///
/// `implicit_no` tells whether `FALSE` already meant "has a --no- form" at this
/// point in history.
pub fn simplify_desc(mut aliases: Vec<AliasRecord>, implicit_no: bool) -> Vec<AliasRecord> {
  for alias in aliases.iter_mut() {
    alias.desc = match alias.desc {
      ArgDesc::False if implicit_no => ArgDesc::Bool,
      ArgDesc::False => ArgDesc::None,
      ArgDesc::True | ArgDesc::Filename => ArgDesc::String,
      other => other,
    };
  }
  aliases
}

/// If both --option and --other-option have "oO" (for example) as their
/// letter, the non-canonical one gets `name` set to the canonical long name.
pub fn group_same(mut aliases: Vec<AliasRecord>) -> Result<Vec<AliasRecord>> {
  let mut seen_letters: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
  for alias in aliases.iter() {
    seen_letters.entry(alias.letter.as_str()).or_default().push(alias.lname.as_str());
  }

  let mut dup_aliases: HashMap<String, &'static str> = HashMap::new();
  for (letter, mut lnames) in seen_letters {
    if lnames.len() < 2 {
      continue;
    }
    lnames.sort_unstable();
    match DUPES.iter().find(|(pair, _)| *pair == lnames.as_slice()) {
      Some((_, winner)) => {
        dup_aliases.insert(letter.to_string(), *winner);
      }
      None => {
        return Err(Error::AliasCollision {
          letter: letter.to_string(),
          lnames: lnames.iter().map(|s| s.to_string()).collect(),
        })
      }
    }
  }

  for alias in aliases.iter_mut() {
    if let Some(winner) = dup_aliases.get(&alias.letter) {
      if alias.lname != *winner {
        alias.name = Some(winner.to_string());
      }
    }
  }
  Ok(aliases)
}

/// Adds `--no-OPTION` right after every `ARG_BOOL` option and folds
/// `ARG_NONE` into `ARG_BOOL`.
pub fn add_negations(aliases: Vec<AliasRecord>) -> Vec<AliasRecord> {
  let mut out = Vec::with_capacity(aliases.len() * 2);
  for mut alias in aliases {
    let is_bool = alias.desc == ArgDesc::Bool;
    if alias.desc == ArgDesc::None {
      alias.desc = ArgDesc::Bool;
    }

    if is_bool {
      let mut negated = alias.clone();
      negated.lname = format!("no-{}", alias.lname);
      if negated.name.is_none() {
        negated.name = Some(alias.lname.clone());
      }
      negated.expand = Some(false);
      out.push(alias);
      out.push(negated);
    } else {
      out.push(alias);
    }
  }
  out
}

pub fn special_case_names(mut aliases: Vec<AliasRecord>) -> Vec<AliasRecord> {
  for alias in aliases.iter_mut() {
    if let Some(name) = NAME_SPECIAL_CASES.get(alias.lname.as_str()) {
      alias.name = name.map(str::to_string);
    }
  }
  aliases
}

/// Runs all stages over one snapshot's aliases.
pub fn normalize_aliases(aliases: Vec<AliasRecord>, implicit_no: bool) -> Result<Vec<AliasRecord>> {
  let aliases = infer_names(aliases);
  let aliases = simplify_desc(aliases, implicit_no);
  // e.g. --ftp-ssl is a deprecated alias for --ssl, they are the same option
  let aliases = group_same(aliases)?;
  let aliases = add_negations(aliases);
  Ok(special_case_names(aliases))
}

/// Normalizes a whole timeline, switching to the implicit `--no-` reading of
/// `FALSE` once `implicit_no_commit` is reached. With no cutover commit every
/// snapshot is read that way.
#[derive(Debug, Clone)]
pub struct Normalizer {
  pub implicit_no_commit: Option<String>,
}

impl Default for Normalizer {
  fn default() -> Self {
    Normalizer { implicit_no_commit: Some(IMPLICIT_NO_COMMIT.to_string()) }
  }
}

impl Normalizer {
  pub fn timeline(&self, raw: Vec<Snapshot>) -> Result<Vec<Snapshot>> {
    let mut implicit_no = self.implicit_no_commit.is_none();
    let mut out = Vec::with_capacity(raw.len());
    for snapshot in raw {
      if self.implicit_no_commit.as_deref() == Some(snapshot.commit.hash.as_str()) {
        debug!(commit = %snapshot.commit.hash, "implicit --no- options start here");
        implicit_no = true;
      }
      let aliases = normalize_aliases(snapshot.aliases, implicit_no)?;
      out.push(Snapshot { commit: snapshot.commit, aliases });
    }
    Ok(out)
  }
}
