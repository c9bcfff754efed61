use std::collections::BTreeMap;

use polars::prelude::*;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::{
  ColumnKind, Error, Range, Result, Table,
  format::{format_number, precision},
  theme::{self, Glyphs},
};

/// Narrowest plot area, in characters, that still leaves room for the axis ticks.
pub const MIN_PLOT_WIDTH: usize = 5;

pub struct BarChart<'a> {
  labels:  &'a Column,
  values:  &'a Column,
  options: ChartOptions,
}

pub struct ChartOptions {
  pub domain: Option<Range>,
  pub width:  usize,
  pub glyphs: &'static Glyphs,
}

impl Default for ChartOptions {
  fn default() -> Self { ChartOptions { domain: None, width: 80, glyphs: &theme::UNICODE } }
}

/// Where the zero line sits, and how many characters each side of it gets.
struct Layout {
  limits:     Range,
  plot_width: usize,
  negative:   usize,
  positive:   usize,
  zero:       usize,
}

impl<'a> BarChart<'a> {
  pub fn new(labels: &'a Column, values: &'a Column) -> Self {
    BarChart { labels, values, options: ChartOptions::default() }
  }

  pub fn from_table(table: &'a Table, label: &str, value: &str) -> Result<Self> {
    Ok(BarChart::new(table.column(label)?, table.column(value)?))
  }

  pub fn options(&mut self, options: ChartOptions) -> &mut Self {
    self.options = options;
    self
  }

  pub fn domain(&mut self, min: f64, max: f64) -> &mut Self {
    self.options.domain = Some(Range::new(min, max));
    self
  }

  pub fn width(&mut self, width: usize) -> &mut Self {
    self.options.width = width;
    self
  }

  pub fn glyphs(&mut self, glyphs: &'static Glyphs) -> &mut Self {
    self.options.glyphs = glyphs;
    self
  }

  /// Renders the chart as lines of text, without a trailing newline.
  pub fn render(&self) -> Result<String> {
    let label_title = self.labels.name().as_str();
    let value_title = self.values.name().as_str();
    if ColumnKind::from(self.values.dtype()) != ColumnKind::Number {
      return Err(Error::NotNumeric(value_title.to_string()));
    }

    let values = self.values.as_materialized_series().cast(&DataType::Float64)?;
    let values = values.f64()?.into_iter().collect::<Vec<_>>();
    if values.iter().flatten().any(|v| !v.is_finite()) {
      return Err(Error::NonFinite(value_title.to_string()));
    }

    let data =
      Range::of_column(self.values)?.ok_or_else(|| Error::NoValues(value_title.to_string()))?;
    let labels = self.labels.as_materialized_series().cast(&DataType::String)?;
    let labels = labels.str()?.into_iter().map(Option::unwrap_or_default).collect::<Vec<_>>();

    let decimals = values.iter().flatten().map(|v| precision(*v)).max().unwrap_or(0);
    let cells = values
      .iter()
      .map(|v| v.map_or_else(|| "-".to_string(), |v| format_number(v, decimals)))
      .collect::<Vec<_>>();

    let label_width =
      labels.iter().map(|l| l.width()).chain([label_title.width()]).max().unwrap_or(0);
    let value_width =
      cells.iter().map(|c| c.width()).chain([value_title.width()]).max().unwrap_or(0);
    let prefix = label_width + value_width + 2;

    let plot_width =
      self.options.width.checked_sub(prefix).filter(|w| *w >= MIN_PLOT_WIDTH).ok_or_else(|| {
        Error::bad_parameter(
          "--width",
          format!(
            "{} characters is too narrow, labels and values alone take {prefix}",
            self.options.width
          ),
        )
      })?;

    let limits = match self.options.domain {
      Some(domain) => {
        if domain.min >= domain.max {
          return Err(Error::bad_parameter(
            "--domain",
            format!("minimum {} must be less than maximum {}", domain.min, domain.max),
          ));
        }
        if !domain.contains(&data.min) || !domain.contains(&data.max) {
          return Err(Error::OutsideDomain {
            column: value_title.to_string(),
            min:    domain.min,
            max:    domain.max,
          });
        }
        domain
      }
      None => data.round_limits(),
    };

    let layout = Layout::new(limits, plot_width);
    debug!(
      plot_width,
      min = layout.limits.min,
      max = layout.limits.max,
      zero = layout.zero,
      "bar chart layout"
    );

    let glyphs = self.options.glyphs;
    let mut lines = Vec::with_capacity(labels.len() + 3);
    lines.push(format!(
      "{} {}",
      pad_right(label_title, label_width),
      pad_left(value_title, value_width)
    ));

    for ((label, cell), value) in labels.iter().zip(&cells).zip(&values) {
      lines.push(format!(
        "{} {} {}",
        pad_right(label, label_width),
        pad_left(cell, value_width),
        layout.bar(*value, glyphs),
      ));
    }

    let ticks = layout.ticks();

    let mut axis = vec![glyphs.line; plot_width];
    for &tick in ticks.keys() {
      axis[tick] = glyphs.tick;
    }
    lines.push(" ".repeat(prefix) + &axis.into_iter().collect::<String>());

    let total = prefix + plot_width;
    let mut tick_text = vec![' '; total];
    let mut free = 0;
    for (&tick, &value) in &ticks {
      let label = format_number(value, decimals);
      let len = label.len();
      if len > total {
        continue;
      }

      let start = (prefix + tick).saturating_sub(len / 2).min(total - len);
      if start < free {
        continue;
      }
      for (slot, c) in tick_text[start..].iter_mut().zip(label.chars()) {
        *slot = c;
      }
      free = start + len + 1;
    }
    lines.push(tick_text.into_iter().collect());

    Ok(lines.iter().map(|line| line.trim_end()).collect::<Vec<_>>().join("\n"))
  }
}

impl Layout {
  fn new(mut limits: Range, plot_width: usize) -> Self {
    if limits.min >= 0.0 {
      limits.min = 0.0;
      if limits.max == 0.0 {
        limits.max = 1.0;
      }
      Layout { limits, plot_width, negative: 0, positive: plot_width - 1, zero: 0 }
    } else if limits.max <= 0.0 {
      limits.max = 0.0;
      Layout { limits, plot_width, negative: plot_width - 1, positive: 0, zero: plot_width - 1 }
    } else {
      let share = limits.min.abs() / limits.size();
      let negative = ((plot_width - 1) as f64 * share).round_ties_even() as usize;
      Layout { limits, plot_width, negative, positive: plot_width - negative - 1, zero: negative }
    }
  }

  /// The plot column `value` falls on.
  fn project(&self, value: f64) -> usize {
    let column = if value >= 0.0 {
      let offset = self.positive as f64 * value / self.limits.max;
      self.negative + offset.round_ties_even() as usize
    } else {
      let offset = self.negative as f64 * value / self.limits.min;
      self.negative.saturating_sub(offset.round_ties_even() as usize)
    };
    column.min(self.plot_width - 1)
  }

  fn bar(&self, value: Option<f64>, glyphs: &Glyphs) -> String {
    let mut bar = String::with_capacity(self.plot_width * glyphs.bar.len_utf8());
    match value {
      Some(v) if v > 0.0 => {
        bar.extend(std::iter::repeat_n(' ', self.negative));
        bar.push(glyphs.zero);
        bar.extend(std::iter::repeat_n(glyphs.bar, self.project(v) - self.negative));
      }
      Some(v) if v < 0.0 => {
        let width = self.negative - self.project(v);
        bar.extend(std::iter::repeat_n(' ', self.negative - width));
        bar.extend(std::iter::repeat_n(glyphs.bar, width));
        bar.push(glyphs.zero);
      }
      _ => {
        bar.extend(std::iter::repeat_n(' ', self.negative));
        bar.push(glyphs.zero);
      }
    }
    bar
  }

  /// Tick positions and the values they mark. A later tick replaces an earlier one at the
  /// same position.
  fn ticks(&self) -> BTreeMap<usize, f64> {
    let mut ticks = BTreeMap::new();
    ticks.insert(0, self.limits.min);
    ticks.insert(self.plot_width - 1, self.limits.max);

    let inner = if self.limits.min >= 0.0 {
      [0.25, 0.5, 0.75].map(|f| self.limits.max * f).to_vec()
    } else if self.limits.max <= 0.0 {
      [0.25, 0.5, 0.75].map(|f| self.limits.min * f).to_vec()
    } else {
      ticks.insert(self.zero, 0.0);
      vec![self.limits.min * 0.5, self.limits.max * 0.5]
    };
    for value in inner {
      ticks.insert(self.project(value), value);
    }
    ticks
  }
}

fn pad_right(text: &str, width: usize) -> String {
  format!("{text}{}", " ".repeat(width.saturating_sub(text.width())))
}

fn pad_left(text: &str, width: usize) -> String {
  format!("{}{text}", " ".repeat(width.saturating_sub(text.width())))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn render(df: &DataFrame, options: ChartOptions) -> Result<String> {
    let columns = df.get_columns();
    BarChart::new(&columns[0], &columns[1]).options(options).render()
  }

  fn ascii(width: usize) -> ChartOptions {
    ChartOptions { width, glyphs: &theme::ASCII, ..Default::default() }
  }

  #[test]
  fn positive_bars() {
    let df = df! {
      "Label" => &["A", "B", "C", "D"],
      "Value" => &[10, 20, 15, 40],
    }
    .unwrap();

    let expected = [
      "Label Value",
      "A        10 |:::::::",
      "B        20 |::::::::::::::",
      "C        15 |::::::::::",
      "D        40 |:::::::::::::::::::::::::::",
      "            +------+------+-----+------+",
      "            0     10     20    30     40",
    ]
    .join("\n");
    assert_eq!(render(&df, ascii(40)).unwrap(), expected);
  }

  #[test]
  fn mixed_signs_share_a_zero_line() {
    let df = df! {
      "n" => &["a", "b"],
      "v" => &[-10, 30],
    }
    .unwrap();

    let chart = render(&df, ascii(25)).unwrap();
    let lines = chart.lines().collect::<Vec<_>>();

    assert_eq!(lines[1], "a -10 ::::|");
    assert_eq!(lines[2], format!("b  30     |{}", ":".repeat(14)));
    assert_eq!(lines[1].find('|'), lines[2].find('|'));
    assert!(lines[4].contains("-10") && lines[4].contains('0') && lines[4].ends_with("30"));
  }

  #[test]
  fn negative_bars_end_at_the_right() {
    let df = df! {
      "n" => &["a", "b"],
      "v" => &[-5.5, -1.0],
    }
    .unwrap();

    let chart = render(&df, ascii(30)).unwrap();
    let lines = chart.lines().collect::<Vec<_>>();

    assert!(lines[1].ends_with(":|"));
    assert!(lines[2].ends_with(":|"));
    assert!(lines[1].matches(':').count() > lines[2].matches(':').count());
    assert!(lines[4].ends_with("0.0"), "{chart}");
  }

  #[test]
  fn missing_values_draw_only_the_zero_mark() {
    let df = df! {
      "n" => &["a", "b"],
      "v" => &[Some(2.5), None],
    }
    .unwrap();

    let chart = render(&df, ascii(30)).unwrap();
    let lines = chart.lines().collect::<Vec<_>>();
    assert_eq!(lines[1].split_whitespace().nth(1), Some("2.5"));
    assert_eq!(lines[2], "b   - |");
  }

  #[test]
  fn rows_fit_the_requested_width() {
    let df = df! {
      "City" => &["Oslo", "Trondheim", "Stavanger"],
      "Pop" => &[709037.0, 212660.0, 144699.5],
    }
    .unwrap();

    for width in [30, 57, 80, 120] {
      let chart = render(&df, ChartOptions { width, ..Default::default() }).unwrap();
      for line in chart.lines() {
        assert!(line.chars().count() <= width, "{line:?} is wider than {width}");
      }
    }
  }

  #[test]
  fn unicode_glyphs_by_default() {
    let df = df! { "n" => &["a"], "v" => &[3] }.unwrap();
    let chart = render(&df, ChartOptions::default()).unwrap();
    assert!(chart.contains('▓') && chart.contains('░'));

    let chart = render(&df, ascii(80)).unwrap();
    assert!(chart.is_ascii());
  }

  #[test]
  fn domain_sets_the_axis() {
    let df = df! { "n" => &["a", "b"], "v" => &[3, 7] }.unwrap();
    let options = ChartOptions { domain: Some(Range::new(0.0, 100.0)), ..ascii(40) };
    let chart = render(&df, options).unwrap();
    assert!(chart.lines().last().unwrap().ends_with("100"), "{chart}");
  }

  #[test]
  fn values_outside_the_domain_fail() {
    let df = df! { "n" => &["a", "b"], "v" => &[3, 700] }.unwrap();
    let err = render(&df, ChartOptions { domain: Some(Range::new(0.0, 100.0)), ..ascii(40) });
    assert!(matches!(err, Err(Error::OutsideDomain { ref column, .. }) if column == "v"));
  }

  #[test]
  fn inverted_domain_fails() {
    let df = df! { "n" => &["a"], "v" => &[3] }.unwrap();
    let err = render(&df, ChartOptions { domain: Some(Range::new(10.0, 0.0)), ..ascii(40) });
    assert!(matches!(err, Err(Error::BadParameter { ref param, .. }) if param == "--domain"));
  }

  #[test]
  fn text_values_fail() {
    let df = df! { "n" => &["a"], "v" => &["x"] }.unwrap();
    assert!(matches!(render(&df, ascii(40)), Err(Error::NotNumeric(_))));
  }

  #[test]
  fn non_finite_values_fail() {
    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
      let df = df! { "n" => &["a", "b"], "v" => &[bad, 2.0] }.unwrap();
      let err = render(&df, ascii(40));
      assert!(matches!(err, Err(Error::NonFinite(ref column)) if column == "v"), "{bad}");
    }
  }

  #[test]
  fn all_null_values_fail() {
    let df = df! { "n" => &["a"], "v" => &[None::<f64>] }.unwrap();
    assert!(matches!(render(&df, ascii(40)), Err(Error::NoValues(_))));
  }

  #[test]
  fn too_narrow_fails() {
    let df = df! { "n" => &["a"], "v" => &[3] }.unwrap();
    let err = render(&df, ascii(8));
    assert!(matches!(err, Err(Error::BadParameter { ref param, .. }) if param == "--width"));
  }

  #[test]
  fn all_zero_values_still_render() {
    let df = df! { "n" => &["a", "b"], "v" => &[0, 0] }.unwrap();
    let chart = render(&df, ascii(20)).unwrap();
    assert_eq!(chart.lines().nth(1), Some("a 0 |"));
  }
}
