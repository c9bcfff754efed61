//! Turns `--label` and `--value` arguments into column names.
//!
//! An argument may be a zero-based column index, a column name, or absent. When
//! absent, the first column of the wanted kind is used.

use tracing::debug;

use crate::{ColumnKind, Error, Result, Table};

pub fn label_column_name(value: Option<&str>, table: &Table) -> Result<String> {
  resolve("label", value, ColumnKind::Text, table)
}

pub fn value_column_name(value: Option<&str>, table: &Table) -> Result<String> {
  resolve("value", value, ColumnKind::Number, table)
}

/// Resolves the argument given to `--{option}` against `table`.
pub fn resolve(
  option: &str,
  value: Option<&str>,
  kind: ColumnKind,
  table: &Table,
) -> Result<String> {
  let param = format!("--{option}");
  let value = value.filter(|v| !v.is_empty());

  let name = match value {
    Some(raw) if is_integer(raw.trim()) => column_at(&param, raw.trim(), table)?,
    Some(raw) if table.contains(raw) => raw.to_string(),
    Some(raw) => return Err(Error::bad_parameter(&param, format!("no column named '{raw}'"))),
    None => table
      .kinds()
      .find(|(_, k)| *k == kind)
      .map(|(name, _)| name.to_string())
      .ok_or_else(|| Error::Usage(format!("no {param} specified and no {kind} column found")))?,
  };

  debug!(option, column = %name, "resolved column");
  Ok(name)
}

/// An optional sign followed by ASCII digits, of any length.
fn is_integer(text: &str) -> bool {
  let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
  !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// The column at the integer literal `index`; literals too large for `usize` are out of range.
fn column_at(param: &str, index: &str, table: &Table) -> Result<String> {
  let position = match index.strip_prefix('-') {
    Some(digits) => digits.bytes().all(|b| b == b'0').then_some(0),
    None => index.trim_start_matches('+').parse::<usize>().ok(),
  };
  let found = position.and_then(|i| table.column_name(i));
  if let Some(name) = found {
    return Ok(name.to_string());
  }

  let message = match table.width().checked_sub(1) {
    Some(last) => format!(
      "index {index} is out of range 0 to {last}; the last column is '{}'",
      table.column_name(last).unwrap_or_default(),
    ),
    None => format!("index {index} is out of range; the table has no columns"),
  };
  Err(Error::bad_parameter(param, message))
}
