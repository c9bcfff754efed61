use std::{
  io::{self, Write},
  process,
};

use clap::Parser;
use csvbars::cli::{self, Args};
use tracing_subscriber::EnvFilter;

fn main() {
  init_tracing();

  let args = Args::parse();
  let chart = match cli::run(&args) {
    Ok(chart) => chart,
    Err(err) => {
      match err.downcast_ref::<csvbars::Error>() {
        Some(err) => eprintln!("Error: {err}"),
        None => eprintln!("Error: {err:#}"),
      }
      process::exit(cli::exit_code(&err));
    }
  };

  // A closed stdout (e.g. piping into `head`) isn't an error.
  if let Err(err) = writeln!(io::stdout().lock(), "{chart}") {
    if err.kind() != io::ErrorKind::BrokenPipe {
      eprintln!("Error: {err}");
      process::exit(1);
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("CSVBARS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
