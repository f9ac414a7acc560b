//! test-support: helpers for the integration tests.
//!
//! Add as a dev-dependency in the top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust,no_run
//! use test_support::{init_tracing, SourceRepo};
//!
//! init_tracing();
//! let repo = SourceRepo::init("master");
//! repo.commit("src/main.c", "struct LongShort aliases[]= {\n};\n", "1999-12-29T00:00:00");
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};
use std::process::Command;
use std::env;

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,curl_option_history=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
    // <repo>/tests/support is this crate; fixtures live next to it
    let support = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    support.parent().unwrap_or(support.as_path()).join("fixtures")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Create (and return) a temp working directory for CLI tests.
/// Also sets CWD to that directory for the duration of `_guard`'s lifetime.
pub fn temp_cwd() -> (tempfile::TempDir, CwdGuard) {
    let td = tempdir();
    let guard = CwdGuard::push(td.path());
    (td, guard)
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Guard that restores the previous current working directory when dropped.
pub struct CwdGuard {
    prev: PathBuf,
}

impl CwdGuard {
    pub fn push<P: AsRef<Path>>(new_dir: P) -> Self {
        let prev = env::current_dir().expect("cwd");
        env::set_current_dir(&new_dir).unwrap_or_else(|e| {
            panic!("failed to set cwd to {}: {e}", new_dir.as_ref().display())
        });
        Self { prev }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.prev);
    }
}

pub fn run_git(repo: &Path, args: &[&str]) -> String {
    let out = Command::new("git").args(args).current_dir(repo).output().unwrap();
    assert!(out.status.success(), "git {:?} failed: {}", args, String::from_utf8_lossy(&out.stderr));
    String::from_utf8_lossy(&out.stdout).to_string()
}

/// Throwaway git repository standing in for a curl checkout.
pub struct SourceRepo {
    dir: tempfile::TempDir,
}

impl SourceRepo {
    /// Empty repository whose initial branch is `branch`.
    pub fn init(branch: &str) -> Self {
        let dir = tempdir();
        run_git(dir.path(), &["init", "-q", "-b", branch]);
        run_git(dir.path(), &["config", "user.name", "Fixture Bot"]);
        run_git(dir.path(), &["config", "user.email", "fixture@example.com"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `rel` and commits it with a fixed author date.
    /// Returns the new commit hash.
    pub fn commit(&self, rel: &str, contents: &str, date: &str) -> String {
        self.commit_bytes(rel, contents.as_bytes(), date)
    }

    pub fn commit_bytes(&self, rel: &str, contents: &[u8], date: &str) -> String {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        run_git(self.path(), &["add", "--", rel]);

        let message = format!("update {}", rel);
        let status = Command::new("git")
            .args(["commit", "-q", "-m", message.as_str()])
            .current_dir(self.path())
            .envs([("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)])
            .status()
            .unwrap();
        assert!(status.success());

        run_git(self.path(), &["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Removes `rel` in its own commit.
    pub fn remove(&self, rel: &str, date: &str) {
        run_git(self.path(), &["rm", "-q", "--", rel]);
        let message = format!("remove {}", rel);
        let status = Command::new("git")
            .args(["commit", "-q", "-m", message.as_str()])
            .current_dir(self.path())
            .envs([("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)])
            .status()
            .unwrap();
        assert!(status.success());
    }

    pub fn checkout_new_branch(&self, branch: &str) {
        run_git(self.path(), &["checkout", "-q", "-b", branch]);
    }
}

/// Renders `entries` as a curl-style `aliases[]` table inside a C file.
pub fn option_table(entries: &[(&str, &str, &str)]) -> String {
    let mut s = String::from("#include \"tool_setup.h\"\n\nstatic const struct LongShort aliases[]= {\n");
    for (letter, lname, desc) in entries {
        s.push_str(&format!("  {{\"{}\", \"{}\", {}}},\n", letter, lname, desc));
    }
    s.push_str("};\n\nint getparameter(void) { return 0; }\n");
    s
}
