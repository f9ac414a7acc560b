// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the option records (per snapshot and reconciled) shared by extraction, normalization, reconciliation and rendering
// role: model/types
// outputs: Serializable structs with stable field names; cache blobs and --json output use these shapes
// invariants: desc tags serialize as the literal C identifiers; optional fields are omitted when absent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Argument type tag as written in the C source.
///
/// `FALSE`/`TRUE` are the original vocabulary (does the option take a value?),
/// the `ARG_*` tags replaced them later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgDesc {
  #[serde(rename = "FALSE")]
  False,
  #[serde(rename = "TRUE")]
  True,
  #[serde(rename = "ARG_BOOL")]
  Bool,
  #[serde(rename = "ARG_NONE")]
  None,
  #[serde(rename = "ARG_STRING")]
  String,
  #[serde(rename = "ARG_FILENAME")]
  Filename,
}

impl ArgDesc {
  /// Takes no value on the command line.
  pub fn is_bool_like(self) -> bool {
    matches!(self, ArgDesc::False | ArgDesc::Bool | ArgDesc::None)
  }
}

impl FromStr for ArgDesc {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "FALSE" => Ok(ArgDesc::False),
      "TRUE" => Ok(ArgDesc::True),
      "ARG_BOOL" => Ok(ArgDesc::Bool),
      "ARG_NONE" => Ok(ArgDesc::None),
      "ARG_STRING" => Ok(ArgDesc::String),
      "ARG_FILENAME" => Ok(ArgDesc::Filename),
      other => Err(Error::UnknownDesc(other.to_string())),
    }
  }
}

/// One entry of the `aliases[]` table in one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
  pub letter: String,
  pub lname: String,
  pub desc: ArgDesc,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expand: Option<bool>,
}

impl AliasRecord {
  pub fn new(letter: &str, lname: &str, desc: ArgDesc) -> Self {
    AliasRecord {
      letter: letter.to_string(),
      lname: lname.to_string(),
      desc,
      name: None,
      expand: None,
    }
  }

  /// Key used to follow a long option through history: everything but the letter.
  pub fn long_key(&self) -> LongKey {
    LongKey {
      lname: self.lname.clone(),
      desc: self.desc,
      name: self.name.clone(),
      expand: self.expand,
    }
  }

  /// Key used to follow a short option through history.
  pub fn short_key(&self) -> ShortKey {
    ShortKey {
      letter: self.letter.clone(),
      long: self.name.clone().unwrap_or_else(|| self.lname.clone()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LongKey {
  pub lname: String,
  pub desc: ArgDesc,
  pub name: Option<String>,
  pub expand: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortKey {
  pub letter: String,
  pub long: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMeta {
  pub hash: String,
  /// Author date, seconds since the epoch
  pub timestamp: i64,
}

/// State of the option table right after one commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
  pub commit: CommitMeta,
  pub aliases: Vec<AliasRecord>,
}

/// Inclusive range of snapshot indices in which an identity is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistenceRun {
  pub start: usize,
  pub end: usize,
}

/// `start` is `None` when the run begins with recorded history; `end` is the
/// first index after the run, `None` when the option is still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetime {
  pub start: Option<usize>,
  pub end: Option<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
  Bool,
  String,
}

impl ArgType {
  pub fn as_str(self) -> &'static str {
    match self {
      ArgType::Bool => "bool",
      ArgType::String => "string",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalLongArg {
  #[serde(rename = "type")]
  pub arg_type: ArgType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deleted: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub expand: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalShortArg {
  pub long: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub deleted: Option<String>,
}

/// Reconciled option history, ready to be emitted. Both tables keep the
/// order in which their identities first appear in the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTable {
  pub long: Vec<(String, FinalLongArg)>,
  pub short: Vec<(String, FinalShortArg)>,
}

impl OptionTable {
  pub fn long_arg(&self, lname: &str) -> Option<&FinalLongArg> {
    self.long.iter().find(|(l, _)| l == lname).map(|(_, a)| a)
  }

  pub fn short_arg(&self, letter: &str) -> Option<&FinalShortArg> {
    self.short.iter().find(|(l, _)| l == letter).map(|(_, a)| a)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn desc_parses_known_tags_and_rejects_others() {
    assert_eq!("ARG_FILENAME".parse::<ArgDesc>().unwrap(), ArgDesc::Filename);
    assert_eq!("FALSE".parse::<ArgDesc>().unwrap(), ArgDesc::False);
    let err = "ARG_INT".parse::<ArgDesc>().unwrap_err();
    assert!(err.to_string().contains("ARG_INT"));
  }

  #[test]
  fn record_serializes_with_c_tags_and_skips_absent_fields() {
    let rec = AliasRecord::new("v", "verbose", ArgDesc::None);
    let v = serde_json::to_value(&rec).unwrap();
    assert_eq!(v, serde_json::json!({"letter": "v", "lname": "verbose", "desc": "ARG_NONE"}));
  }

  #[test]
  fn short_key_prefers_canonical_name() {
    let mut rec = AliasRecord::new("N", "no-buffer", ArgDesc::Bool);
    rec.name = Some("buffer".into());
    assert_eq!(rec.short_key().long, "buffer");
    assert_eq!(rec.long_key().name.as_deref(), Some("buffer"));
  }
}
