// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Serialize the reconciled option table as JS literals and splice it between the sentinels of the template file
// role: rendering/output
// inputs: OptionTable, template text or path
// outputs: tab-indented `var extractedLongOptions = [...]` and `var extractedShortOptions = {...}` lines
// side_effects: write_into_template rewrites the template file in place
// invariants:
// - text before the start sentinel line and from the end sentinel line on is preserved verbatim
// - long fields are emitted as type, name, deleted, expand; short fields as long, deleted
// errors: a missing sentinel aborts before anything is written
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{FinalLongArg, FinalShortArg, OptionTable};

pub const JS_PARAMS_START: &str = "BEGIN GENERATED CURL OPTIONS";
pub const JS_PARAMS_END: &str = "END GENERATED CURL OPTIONS";

pub const LONG_OPTIONS_VAR: &str = "extractedLongOptions";
pub const SHORT_OPTIONS_VAR: &str = "extractedShortOptions";

enum Literal<'a> {
  Str(&'a str),
  Bool(bool),
}

impl Literal<'_> {
  fn render(&self) -> String {
    match self {
      Literal::Str(s) => quote(s),
      Literal::Bool(b) => b.to_string(),
    }
  }
}

/// Quotes a string literal, preferring single quotes.
pub fn quote(s: &str) -> String {
  let q = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
  let mut out = String::with_capacity(s.len() + 2);
  out.push(q);
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c == q => {
        out.push('\\');
        out.push(c);
      }
      c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
      c => out.push(c),
    }
  }
  out.push(q);
  out
}

/// Object keys stay bare when they are plain words.
fn object_key(k: &str) -> String {
  if !k.is_empty() && k.chars().all(char::is_alphabetic) {
    k.to_string()
  } else {
    quote(k)
  }
}

fn object(fields: &[(&str, Literal)]) -> String {
  let vals: Vec<String> = fields.iter().map(|(k, v)| format!("{}: {}", object_key(k), v.render())).collect();
  format!("{{{}}}", vals.join(", "))
}

fn long_fields(arg: &FinalLongArg) -> Vec<(&'static str, Literal<'_>)> {
  let mut fields = vec![("type", Literal::Str(arg.arg_type.as_str()))];
  if let Some(name) = &arg.name {
    fields.push(("name", Literal::Str(name)));
  }
  if let Some(deleted) = &arg.deleted {
    fields.push(("deleted", Literal::Str(deleted)));
  }
  if let Some(expand) = arg.expand {
    fields.push(("expand", Literal::Bool(expand)));
  }
  fields
}

fn short_fields(arg: &FinalShortArg) -> Vec<(&'static str, Literal<'_>)> {
  let mut fields = vec![("long", Literal::Str(arg.long.as_str()))];
  if let Some(deleted) = &arg.deleted {
    fields.push(("deleted", Literal::Str(deleted)));
  }
  fields
}

/// The generated block, one element per output line (no newlines).
pub fn format_as_js(table: &OptionTable) -> Vec<String> {
  let mut lines = Vec::with_capacity(table.long.len() + table.short.len() + 4);

  lines.push(format!("\tvar {} = [", LONG_OPTIONS_VAR));
  for (lname, arg) in &table.long {
    lines.push(format!("\t\t[{}, {}],", quote(lname), object(&long_fields(arg))));
  }
  lines.push("\t]".to_string());

  lines.push(format!("\tvar {} = {{", SHORT_OPTIONS_VAR));
  for (letter, arg) in &table.short {
    lines.push(format!("\t\t{}: {},", quote(letter), object(&short_fields(arg))));
  }
  lines.push("\t}".to_string());

  lines
}

/// Replaces whatever sits between the sentinel lines of `template`.
pub fn splice(template: &str, generated: &[String], path: &str) -> Result<String> {
  let text = template.replace("\r\n", "\n");
  let mut lines = text.split_inclusive('\n');
  let mut out = String::with_capacity(text.len());

  let mut found_start = false;
  for line in lines.by_ref() {
    out.push_str(line);
    if line.contains(JS_PARAMS_START) {
      found_start = true;
      break;
    }
  }
  if !found_start {
    return Err(Error::MissingMarker { marker: format!("// {}", JS_PARAMS_START), path: path.to_string() });
  }

  for line in generated {
    out.push_str(line);
    out.push('\n');
  }

  let mut found_end = false;
  for line in lines.by_ref() {
    if line.contains(JS_PARAMS_END) {
      out.push_str(line);
      found_end = true;
      break;
    }
  }
  if !found_end {
    return Err(Error::MissingMarker { marker: format!("// {}", JS_PARAMS_END), path: path.to_string() });
  }

  for line in lines {
    out.push_str(line);
  }
  Ok(out)
}

pub fn write_into_template(path: &Path, table: &OptionTable) -> Result<()> {
  let template = std::fs::read_to_string(path)?;
  let updated = splice(&template, &format_as_js(table), &path.display().to_string())?;
  std::fs::write(path, updated)?;
  Ok(())
}
