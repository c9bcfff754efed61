use polars::error::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  /// A command-line value that names something the table doesn't have.
  #[error("Invalid value for '{param}': {message}")]
  BadParameter { param: String, message: String },

  #[error("{0}")]
  Usage(String),

  #[error("Invalid value for '--encoding': unknown encoding '{0}'")]
  UnknownEncoding(String),

  #[error("Invalid value for 'CSV': file not encoded as {0}")]
  Encoding(&'static str),

  #[error("Invalid value for 'CSV': not a valid CSV file: {0}")]
  Csv(#[source] PolarsError),

  #[error("column '{0}' does not contain numeric data")]
  NotNumeric(String),

  #[error("column '{0}' contains non-finite values")]
  NonFinite(String),

  #[error("column '{0}' has no values to chart")]
  NoValues(String),

  #[error("column '{column}' contains values outside the domain {min} to {max}")]
  OutsideDomain { column: String, min: f64, max: f64 },

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Polars error: {0}")]
  Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub fn bad_parameter(param: &str, message: impl Into<String>) -> Self {
    Error::BadParameter { param: param.to_string(), message: message.into() }
  }

  /// Usage mistakes exit with 2, the same code clap uses for its own parse errors.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::BadParameter { .. }
      | Error::Usage(_)
      | Error::UnknownEncoding(_)
      | Error::Encoding(_)
      | Error::Csv(_) => 2,
      _ => 1,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parameter_errors_name_the_option() {
    let err = Error::bad_parameter("--value", "no column named 'Foo'");
    assert_eq!(err.to_string(), "Invalid value for '--value': no column named 'Foo'");
    assert_eq!(err.exit_code(), 2);
  }

  #[test]
  fn chart_errors_exit_with_one() {
    let err = Error::OutsideDomain { column: "Pop".into(), min: 0.0, max: 10.0 };
    assert_eq!(err.to_string(), "column 'Pop' contains values outside the domain 0 to 10");
    assert_eq!(err.exit_code(), 1);
  }
}
