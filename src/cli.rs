use std::{
  fs,
  io::{self, Read},
  path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use crate::{
  BarChart, Error, LoadOptions, Table, label_column_name,
  theme::{ASCII, UNICODE},
  value_column_name,
};

/// Used when `--width` isn't given and the terminal size can't be read.
pub const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Parser)]
#[command(name = "csvbars", version)]
#[command(about = "Load CSV data and output a bar chart.")]
pub struct Args {
  /// CSV file to chart, or `-` to read standard input.
  #[arg(value_name = "CSV")]
  pub csv: PathBuf,

  /// Name or index of the column containing the label values. Defaults to the first text column.
  #[arg(long, allow_hyphen_values = true)]
  pub label: Option<String>,

  /// Name or index of the column containing the bar values. Defaults to the first numeric column.
  #[arg(long, allow_hyphen_values = true)]
  pub value: Option<String>,

  /// Minimum and maximum values for the chart's x-axis.
  #[arg(
    long,
    num_args = 2,
    value_names = ["MIN", "MAX"],
    value_parser = parse_number,
    allow_negative_numbers = true
  )]
  pub domain: Option<Vec<f64>>,

  /// Width, in characters, to use to print the chart. Defaults to the terminal width.
  #[arg(long)]
  pub width: Option<usize>,

  /// Number of rows to skip.
  #[arg(long, default_value_t = 0)]
  pub skip: usize,

  /// Character encoding of the CSV file.
  #[arg(long, default_value = "UTF-8")]
  pub encoding: String,

  /// Indicates the CSV file contains no header row.
  #[arg(long)]
  pub no_header: bool,

  /// Only use ASCII characters to draw the bar chart.
  #[arg(long)]
  pub use_ascii: bool,
}

/// Loads the CSV named by `args` and renders its bar chart.
pub fn run(args: &Args) -> anyhow::Result<String> {
  let options = LoadOptions::default()
    .encoding(&args.encoding)?
    .skip_lines(args.skip)
    .has_header(!args.no_header);

  let bytes = read_input(&args.csv)?;
  let table = Table::from_csv(&bytes, options)?;

  let label = label_column_name(args.label.as_deref(), &table)?;
  let value = value_column_name(args.value.as_deref(), &table)?;

  let mut chart = BarChart::from_table(&table, &label, &value)?;
  chart
    .width(args.width.unwrap_or_else(terminal_width))
    .glyphs(if args.use_ascii { &ASCII } else { &UNICODE });
  if let Some(&[min, max]) = args.domain.as_deref() {
    chart.domain(min, max);
  }

  Ok(chart.render()?)
}

/// The process exit code for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> i32 { err.downcast_ref::<Error>().map_or(1, Error::exit_code) }

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
  if path == Path::new("-") {
    let mut bytes = vec![];
    io::stdin().lock().read_to_end(&mut bytes).context("failed to read standard input")?;
    Ok(bytes)
  } else {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
  }
}

fn terminal_width() -> usize {
  match crossterm::terminal::size() {
    Ok((columns, _)) if columns > 0 => usize::from(columns),
    Ok(_) => DEFAULT_WIDTH,
    Err(err) => {
      debug!("no terminal size ({err}), using {DEFAULT_WIDTH} columns");
      DEFAULT_WIDTH
    }
  }
}

fn parse_number(value: &str) -> Result<f64, String> {
  value
    .trim()
    .parse::<f64>()
    .ok()
    .filter(|n| n.is_finite())
    .ok_or_else(|| format!("'{value}' is not a valid number."))
}
