use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use view_helper::bundle::BundleGenerator;
use view_helper::models::{BundleOutcome, BundleRecord};
use view_helper::{RequestContext, View, ViewConfig};

/// Build asset bundles and render views outside of a web request.
#[derive(Debug, Parser)]
#[command(name = "view-helper", version, about)]
struct Cli {
  /// Configuration file (JSON or YAML). Defaults to `view.config.json` in the current
  /// directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Generate the global JavaScript and stylesheet bundles.
  Bundle,
  /// Print the base URL, deriving it from CGI variables when none is configured.
  BaseUrl,
  /// Render a template to stdout.
  Render {
    /// Template file to render.
    template: PathBuf,
  },
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("view_helper=info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let config = load_config(cli.config)?;

  match cli.command {
    Command::Bundle => {
      let report = BundleGenerator::new(&config).generate()?;
      print_record(&report.js);
      print_record(&report.css);
    }
    Command::BaseUrl => {
      let view = View::new(config, RequestContext::from_env())?;
      println!("{}", view.base());
    }
    Command::Render { template } => {
      let view = View::new(config, RequestContext::from_env())?;
      print!("{}", view.render(&template)?);
    }
  }

  Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ViewConfig> {
  match path {
    Some(path) => ViewConfig::load(&path)
      .with_context(|| format!("failed to load configuration {}", path.display())),
    None => {
      let cwd = std::env::current_dir().context("failed to resolve current directory")?;
      Ok(ViewConfig::discover(&cwd)?)
    }
  }
}

fn print_record(record: &BundleRecord) {
  match &record.outcome {
    BundleOutcome::Written { sources, bytes } => println!(
      "{}: wrote {} ({sources} sources, {bytes} bytes)",
      record.kind,
      record.target.display()
    ),
    BundleOutcome::Reused => println!("{}: kept {}", record.kind, record.target.display()),
  }
}
