//! Number formatting for value cells and tick labels.

pub const MAX_PRECISION: usize = 6;

/// Decimal places in the shortest representation of `value`, capped at [`MAX_PRECISION`].
pub fn precision(value: f64) -> usize {
  let text = value.to_string();
  text.split_once('.').map_or(0, |(_, fraction)| fraction.len()).min(MAX_PRECISION)
}

/// Formats `value` with a fixed number of decimals and comma thousands separators.
pub fn format_number(value: f64, decimals: usize) -> String {
  let text = format!("{:.*}", decimals, value.abs());
  let (integer, fraction) = match text.split_once('.') {
    Some((integer, fraction)) => (integer, Some(fraction)),
    None => (text.as_str(), None),
  };

  let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
  if value < 0.0 && text.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
    out.push('-');
  }
  for (i, digit) in integer.chars().enumerate() {
    if i > 0 && (integer.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(digit);
  }
  if let Some(fraction) = fraction {
    out.push('.');
    out.push_str(fraction);
  }
  out
}
