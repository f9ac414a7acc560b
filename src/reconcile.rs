// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Follow every long and short option identity across the normalized timeline and decide when (if ever) it was deleted
// role: reconciliation/core
// inputs: normalized snapshots in commit order
// outputs: OptionTable (long and short records in first-appearance order)
// invariants:
// - runs of one identity never overlap and never touch
// - an identity is deleted only if none of its runs reaches the latest snapshot
// - one short record per letter; a deleted record yields to a later definition
// errors: a repeated snapshot index for one identity aborts (OverlappingRange)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::{BTreeMap, HashMap};
use std::collections::hash_map::Entry;
use std::hash::Hash;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
  ArgType, ExistenceRun, FinalLongArg, FinalShortArg, Lifetime, LongKey, OptionTable, ShortKey, Snapshot,
};

/// `-N` is short for `--no-buffer`, but the table lists it under "buffer".
pub const NEGATED_SHORT_LETTER: &str = "N";

/// Snapshot indices per key, remembering the order keys were first seen.
#[derive(Debug)]
pub struct Occurrences<K> {
  order: Vec<K>,
  indices: HashMap<K, Vec<usize>>,
}

impl<K: Eq + Hash + Clone> Occurrences<K> {
  pub fn new() -> Self {
    Occurrences { order: Vec::new(), indices: HashMap::new() }
  }

  pub fn add(&mut self, key: K, idx: usize) {
    match self.indices.get_mut(&key) {
      Some(v) => v.push(idx),
      None => {
        self.order.push(key.clone());
        self.indices.insert(key, vec![idx]);
      }
    }
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&K, &[usize])> + '_ {
    self.order.iter().map(move |k| (k, self.indices[k].as_slice()))
  }
}

impl<K: Eq + Hash + Clone> Default for Occurrences<K> {
  fn default() -> Self {
    Self::new()
  }
}

/// Splits an ascending list of snapshot indices into maximal consecutive runs.
pub fn consecutive_runs(seq: &[usize]) -> Result<Vec<ExistenceRun>> {
  let Some(&first) = seq.first() else {
    return Ok(Vec::new());
  };

  let mut runs = Vec::new();
  let mut run = ExistenceRun { start: first, end: first };
  for pair in seq.windows(2) {
    let (prev, cur) = (pair[0], pair[1]);
    if cur == prev + 1 {
      run.end = cur;
    } else if cur <= prev {
      return Err(Error::OverlappingRange(seq.to_vec()));
    } else {
      runs.push(run);
      run = ExistenceRun { start: cur, end: cur };
    }
  }
  runs.push(run);
  Ok(runs)
}

/// Open-ended at either side when the run touches the first or the latest snapshot.
pub fn lifetimes(runs: &[ExistenceRun], total: usize) -> Vec<Lifetime> {
  runs
    .iter()
    .map(|r| Lifetime {
      start: if r.start > 0 { Some(r.start) } else { None },
      end: if r.end + 1 < total { Some(r.end + 1) } else { None },
    })
    .collect()
}

/// Commit of the last snapshot the identity was seen in, unless it survives
/// to the present. Options removed and re-added only count their final removal.
///
/// This is the commit *before* the removal, not the commit that removed the
/// option, so it differs from older generated tables by one commit.
pub fn deletion_point(lifetimes: &[Lifetime], commits: &[&str]) -> Option<String> {
  let mut last_end = 0;
  for lt in lifetimes {
    last_end = last_end.max(lt.end?);
  }
  if last_end == 0 {
    return None;
  }
  commits.get(last_end - 1).map(|c| c.to_string())
}

/// Where every long and short identity is present across the timeline.
pub fn collect_occurrences(timeline: &[Snapshot]) -> (Occurrences<LongKey>, Occurrences<ShortKey>) {
  let mut long_args = Occurrences::new();
  let mut short_args = Occurrences::new();

  for (idx, snapshot) in timeline.iter().enumerate() {
    for alias in snapshot.aliases.iter() {
      long_args.add(alias.long_key(), idx);
      // aliases of another option don't own their letter
      if alias.letter.chars().count() == 1 && alias.name.is_none() {
        short_args.add(alias.short_key(), idx);
      }
    }
  }
  (long_args, short_args)
}

/// Reconciles a normalized timeline into the final option table.
pub fn find_deleted(timeline: &[Snapshot]) -> Result<OptionTable> {
  let commits: Vec<&str> = timeline.iter().map(|s| s.commit.hash.as_str()).collect();
  let total = timeline.len();
  let (long_args, short_args) = collect_occurrences(timeline);
  debug!(long = long_args.len(), short = short_args.len(), snapshots = total, "collected option identities");

  let mut long = Vec::with_capacity(long_args.len());
  for (key, indices) in long_args.iter() {
    let runs = consecutive_runs(indices)?;
    let lts = lifetimes(&runs, total);

    // one option had a trailing space
    let name = key.name.clone().or_else(|| {
      let trimmed = key.lname.trim();
      (trimmed != key.lname).then(|| trimmed.to_string())
    });
    let arg = FinalLongArg {
      arg_type: if key.desc.is_bool_like() { ArgType::Bool } else { ArgType::String },
      name,
      deleted: deletion_point(&lts, &commits),
      expand: key.expand,
    };
    long.push((key.lname.clone(), arg));
  }
  log_long_conflicts(&long);

  let mut short: Vec<(String, FinalShortArg)> = Vec::new();
  let mut slots: HashMap<&str, usize> = HashMap::new();
  let mut claims: BTreeMap<&str, usize> = BTreeMap::new();
  for (key, indices) in short_args.iter() {
    let runs = consecutive_runs(indices)?;
    let lts = lifetimes(&runs, total);
    *claims.entry(key.letter.as_str()).or_default() += 1;

    let long_name = if key.letter == NEGATED_SHORT_LETTER {
      format!("no-{}", key.long)
    } else {
      key.long.clone()
    };
    let arg = FinalShortArg { long: long_name, deleted: deletion_point(&lts, &commits) };

    // a superseded letter keeps its slot
    match slots.entry(key.letter.as_str()) {
      Entry::Occupied(slot) => {
        let existing = &mut short[*slot.get()].1;
        if existing.deleted.is_some() {
          *existing = arg;
        }
      }
      Entry::Vacant(slot) => {
        slot.insert(short.len());
        short.push((key.letter.clone(), arg));
      }
    }
  }
  for (letter, n) in claims.iter().filter(|(_, n)| **n > 1) {
    debug!(letter = %letter, identities = n, "short letter used by several options over time");
  }

  Ok(OptionTable { long, short })
}

fn log_long_conflicts(long: &[(String, FinalLongArg)]) {
  let mut sorted: Vec<&(String, FinalLongArg)> = long.iter().collect();
  sorted.sort_by(|a, b| a.0.cmp(&b.0));
  for group in sorted.chunk_by(|a, b| a.0 == b.0) {
    if group.len() > 1 {
      debug!(lname = %group[0].0, variants = ?group.iter().map(|(_, a)| a).collect::<Vec<_>>(), "long option changed identity over time");
    }
  }
}
