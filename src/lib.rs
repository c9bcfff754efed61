//! Text bar charts from CSV files.
//!
//! A CSV file is loaded into a [`Table`] with inferred column types, the label and
//! value columns are picked with [`label_column_name`] and [`value_column_name`],
//! and a [`BarChart`] renders one bar per row.

mod bar_chart;
mod bounds;
pub mod cli;
mod error;
pub mod format;
mod resolve;
mod table;
pub mod theme;

pub use bar_chart::{BarChart, ChartOptions, MIN_PLOT_WIDTH};
pub use bounds::Range;
pub use error::{Error, Result};
pub use resolve::{label_column_name, resolve, value_column_name};
pub use table::{ColumnKind, LoadOptions, Table};
