use std::{fmt, io::Cursor};

use encoding_rs::{Encoding, UTF_8};
use polars::prelude::*;
use tracing::debug;

use crate::{Error, Result};

/// A CSV file parsed into typed columns.
pub struct Table {
  frame: DataFrame,
}

/// The type of a column, as inferred from its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
  Text,
  Number,
  Boolean,
  Date,
  DateTime,
  Other,
}

#[derive(Clone, Copy)]
pub struct LoadOptions {
  pub encoding:   &'static Encoding,
  pub skip_lines: usize,
  pub has_header: bool,
}

impl Default for LoadOptions {
  fn default() -> Self { LoadOptions { encoding: UTF_8, skip_lines: 0, has_header: true } }
}

impl LoadOptions {
  pub fn encoding(mut self, label: &str) -> Result<Self> {
    self.encoding = Encoding::for_label(label.trim().as_bytes())
      .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;
    Ok(self)
  }

  pub fn skip_lines(mut self, lines: usize) -> Self {
    self.skip_lines = lines;
    self
  }

  pub fn has_header(mut self, has_header: bool) -> Self {
    self.has_header = has_header;
    self
  }
}

impl From<&DataType> for ColumnKind {
  fn from(dtype: &DataType) -> Self {
    match dtype {
      DataType::String => ColumnKind::Text,
      DataType::Boolean => ColumnKind::Boolean,
      DataType::Int8
      | DataType::Int16
      | DataType::Int32
      | DataType::Int64
      | DataType::UInt8
      | DataType::UInt16
      | DataType::UInt32
      | DataType::UInt64
      | DataType::Float32
      | DataType::Float64 => ColumnKind::Number,
      DataType::Date => ColumnKind::Date,
      DataType::Datetime(_, _) => ColumnKind::DateTime,
      _ => ColumnKind::Other,
    }
  }
}

impl fmt::Display for ColumnKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      ColumnKind::Text => "text",
      ColumnKind::Number => "numeric",
      ColumnKind::Boolean => "boolean",
      ColumnKind::Date => "date",
      ColumnKind::DateTime => "datetime",
      ColumnKind::Other => "other",
    })
  }
}

impl From<DataFrame> for Table {
  fn from(frame: DataFrame) -> Self { Table { frame } }
}

impl Table {
  pub fn from_csv(bytes: &[u8], options: LoadOptions) -> Result<Table> {
    let (text, _, had_errors) = options.encoding.decode(bytes);
    if had_errors {
      return Err(Error::Encoding(options.encoding.name()));
    }

    let mut frame = CsvReadOptions::default()
      .with_has_header(options.has_header)
      .with_skip_rows(options.skip_lines)
      .with_infer_schema_length(None)
      .map_parse_options(|parse| parse.with_try_parse_dates(true))
      .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
      .finish()
      .map_err(Error::Csv)?;

    if !options.has_header {
      frame.set_column_names((0..frame.width()).map(letter_name))?;
    }

    debug!(rows = frame.height(), columns = frame.width(), "loaded csv");
    Ok(Table { frame })
  }

  pub fn width(&self) -> usize { self.frame.width() }
  pub fn height(&self) -> usize { self.frame.height() }

  pub fn column_name(&self, index: usize) -> Option<&str> {
    self.frame.get_columns().get(index).map(|c| c.name().as_str())
  }
  pub fn column_kind(&self, index: usize) -> Option<ColumnKind> {
    self.frame.get_columns().get(index).map(|c| ColumnKind::from(c.dtype()))
  }

  /// Column names and kinds, in the order they appear in the file.
  pub fn kinds(&self) -> impl Iterator<Item = (&str, ColumnKind)> + '_ {
    self.frame.get_columns().iter().map(|c| (c.name().as_str(), ColumnKind::from(c.dtype())))
  }

  pub fn contains(&self, name: &str) -> bool { self.frame.column(name).is_ok() }

  pub fn column(&self, name: &str) -> Result<&Column> { Ok(self.frame.column(name)?) }
}

/// Names a column of a headerless file: `a` through `z`, then `aa`, `bb`, and so on.
fn letter_name(index: usize) -> String {
  let letter = char::from(b'a' + (index % 26) as u8);
  std::iter::repeat_n(letter, index / 26 + 1).collect()
}
