use polars::prelude::*;

use crate::{Result, format};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn contains(&self, value: &f64) -> bool { *value >= self.min && *value <= self.max }

  /// The smallest and largest non-null values of a numeric column, or `None` if it has none.
  pub fn of_column(column: &Column) -> Result<Option<Range>> {
    let series = column.as_materialized_series();
    let min = series.min::<f64>()?;
    let max = series.max::<f64>()?;

    Ok(min.zip(max).map(|(min, max)| Range::new(min, max)))
  }

  /// Widens the range outward to round numbers, for use as axis limits.
  ///
  /// Limits are rounded at the leading digit of the larger value, so `3..127` becomes
  /// `0..200`. Ranges within `(-1, 1)` are rounded one decimal place above the coarser of
  /// the two values.
  pub fn round_limits(&self) -> Range {
    let digits = integer_digits(self.min).max(integer_digits(self.max));

    if digits > 0 {
      let step = 10f64.powi(digits - 1);
      return Range { min: (self.min / step).floor() * step, max: (self.max / step).ceil() * step };
    }

    // Divide rather than multiply by a fractional step, so 0.6 doesn't come out as 0.6000000000000001.
    let exponent = decimal_exponent(self.min).max(decimal_exponent(self.max));
    let scale = 10f64.powi(-(exponent + 1));
    Range { min: snap(self.min * scale).floor() / scale, max: snap(self.max * scale).ceil() / scale }
  }
}

/// Digits before the decimal point. Zero has one; `0.05` has `-1`.
fn integer_digits(value: f64) -> i32 {
  if value == 0.0 { 1 } else { value.abs().log10().floor() as i32 + 1 }
}

/// Drops float noise such as the `4` in `3.0000000000000004`.
fn snap(value: f64) -> f64 { (value * 1e9).round() / 1e9 }

/// The power of ten of the last significant digit, e.g. `-2` for `0.25`.
fn decimal_exponent(value: f64) -> i32 { -(format::precision(value) as i32) }
