use curl_option_history::error::Error;
use curl_option_history::extract::Extractor;
use curl_option_history::gitio;
use curl_option_history::history::{explicit_aliases_over_time, FILENAMES};
use curl_option_history::model::ArgType;
use curl_option_history::normalize::Normalizer;
use curl_option_history::pipeline::reconcile_history;
use test_support::{init_tracing, option_table, SourceRepo};

struct Fixture {
  repo: SourceRepo,
  m1: String,
  m2: String,
  t1: String,
}

fn curl_like_repo() -> Fixture {
  let repo = SourceRepo::init("master");
  let m1 = repo.commit(
    "src/main.c",
    &option_table(&[
      ("v", "verbose", "FALSE"),
      ("o", "output", "TRUE"),
      ("9", "crlf", "FALSE"),
      ("N", "buffer", "FALSE"),
    ]),
    "1999-12-29T10:00:00",
  );
  let m2 = repo.commit(
    "src/main.c",
    &option_table(&[
      ("v", "verbose", "FALSE"),
      ("o", "output", "TRUE"),
      ("N", "buffer", "FALSE"),
      ("V", "version", "FALSE"),
    ]),
    "2000-03-01T10:00:00",
  );
  let t1 = repo.commit(
    "src/tool_getparam.c",
    &option_table(&[
      ("v", "verbose", "ARG_BOOL"),
      ("o", "output", "ARG_FILENAME"),
      ("N", "buffer", "ARG_BOOL"),
      ("V", "version", "ARG_NONE"),
    ]),
    "2011-09-09T10:00:00",
  );
  // deleting main.c must not add a snapshot
  repo.remove("src/main.c", "2011-09-10T10:00:00");
  Fixture { repo, m1, m2, t1 }
}

#[test]
fn lists_commits_oldest_first_without_deletions() {
  init_tracing();
  let fx = curl_like_repo();
  let commits = gitio::commits_that_changed(fx.repo.path(), "src/main.c").unwrap();
  let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
  assert_eq!(hashes, [fx.m1.as_str(), fx.m2.as_str()]);
  assert!(commits[0].timestamp < commits[1].timestamp);
  assert_eq!(gitio::current_branch(fx.repo.path()).unwrap().as_deref(), Some("master"));
}

#[test]
fn reads_latin1_file_contents() {
  let repo = SourceRepo::init("master");
  let mut bytes = option_table(&[("v", "verbose", "ARG_BOOL")]).into_bytes();
  bytes.extend_from_slice(b"/* Bj\xf6rn */\n");
  let sha = repo.commit_bytes("src/tool_getparam.c", &bytes, "2020-01-01T00:00:00");
  let text = gitio::file_at(repo.path(), &sha, "src/tool_getparam.c").unwrap();
  assert!(text.contains("Björn"));
}

#[test]
fn walks_both_files_in_order() {
  let fx = curl_like_repo();
  let mut ex = Extractor::new();
  let snapshots = explicit_aliases_over_time(fx.repo.path(), &FILENAMES, &mut ex).unwrap();
  let hashes: Vec<&str> = snapshots.iter().map(|s| s.commit.hash.as_str()).collect();
  assert_eq!(hashes, [fx.m1.as_str(), fx.m2.as_str(), fx.t1.as_str()]);
  assert_eq!(snapshots[0].aliases.len(), 4);
}

#[test]
fn reconciles_lifetimes_across_the_move() {
  let fx = curl_like_repo();
  let mut ex = Extractor::new();
  let raw = explicit_aliases_over_time(fx.repo.path(), &FILENAMES, &mut ex).unwrap();
  let table = reconcile_history(raw, &Normalizer { implicit_no_commit: Some(fx.m2.clone()) }).unwrap();

  let names: Vec<&str> = table.long.iter().map(|(l, _)| l.as_str()).collect();
  assert_eq!(
    names,
    ["verbose", "output", "crlf", "buffer", "no-verbose", "no-buffer", "version", "no-version"]
  );

  let crlf = table.long_arg("crlf").unwrap();
  assert_eq!(crlf.arg_type, ArgType::Bool);
  assert_eq!(crlf.deleted.as_deref(), Some(fx.m1.as_str()));

  // ARG_NONE has no negated form, so --no-version only existed in m2
  assert_eq!(table.long_arg("no-version").unwrap().deleted.as_deref(), Some(fx.m2.as_str()));
  assert_eq!(table.long_arg("no-verbose").unwrap().deleted, None);
  assert_eq!(table.long_arg("output").unwrap().arg_type, ArgType::String);
  assert_eq!(table.long_arg("output").unwrap().deleted, None);

  assert_eq!(table.short_arg("N").unwrap().long, "no-buffer");
  assert_eq!(table.short_arg("9").unwrap().deleted.as_deref(), Some(fx.m1.as_str()));
  assert_eq!(table.short_arg("v").unwrap().deleted, None);
}

#[test]
fn empty_option_table_aborts_the_walk() {
  let repo = SourceRepo::init("master");
  let sha = repo.commit("src/main.c", "int main(void) { return 0; }\n", "1999-12-29T10:00:00");
  let mut ex = Extractor::new();
  let err = explicit_aliases_over_time(repo.path(), &["src/main.c"], &mut ex).unwrap_err();
  assert!(matches!(err, Error::NoAliases { ref commit, .. } if *commit == sha));
}
