use std::fmt;

/// Result type for the extraction, normalization and reconciliation stages
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that aborts a run. None of these are recoverable: the history
/// is a chain, and one bad link invalidates everything after it.
#[derive(Debug)]
pub enum Error {
  /// Working directory, source checkout or branch is not what the run expects
  Environment(String),

  /// A struct-literal entry could not be split into letter, long name and type
  Parse { line: String, reason: String },

  /// Type tag outside the known vocabulary
  UnknownDesc(String),

  /// Short letter field that is not 1 or 2 characters long
  BadLetter { lname: String, letter: String },

  /// The option table was not found or was empty (the struct shape changed)
  NoAliases { commit: String, filename: String },

  /// Several long names share a short letter and no winner is registered
  AliasCollision { letter: String, lnames: Vec<String> },

  /// An identity appeared twice in the same snapshot index list
  OverlappingRange(Vec<usize>),

  /// A template sentinel line is missing
  MissingMarker { marker: String, path: String },

  /// A git subprocess failed
  Git { args: Vec<String>, stderr: String },

  Io(std::io::Error),

  Json(serde_json::Error),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::Environment(msg) => write!(f, "{}", msg),
      Error::Parse { line, reason } => write!(f, "cannot parse option entry {:?}: {}", line, reason),
      Error::UnknownDesc(desc) => write!(f, "unknown desc: {:?}", desc),
      Error::BadLetter { lname, letter } => write!(
        f,
        "letter form of --{} must be 1 or 2 characters long, got {:?}",
        lname, letter
      ),
      Error::NoAliases { commit, filename } => {
        write!(f, "failed to extract params from {}:{}", commit, filename)
      }
      Error::AliasCollision { letter, lnames } => write!(
        f,
        "the options {:?} are the same option, they have the same letter {:?}. Which one is the main one?",
        lnames, letter
      ),
      Error::OverlappingRange(seq) => write!(f, "overlapping range: {:?}", seq),
      Error::MissingMarker { marker, path } => write!(f, "{:?} not in {}", marker, path),
      Error::Git { args, stderr } => write!(f, "git {:?} failed: {}", args, stderr.trim_end()),
      Error::Io(err) => write!(f, "IO error: {}", err),
      Error::Json(err) => write!(f, "JSON error: {}", err),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Io(err) => Some(err),
      Error::Json(err) => Some(err),
      _ => None,
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(err: std::io::Error) -> Self {
    Error::Io(err)
  }
}

impl From<serde_json::Error> for Error {
  fn from(err: serde_json::Error) -> Self {
    Error::Json(err)
  }
}
