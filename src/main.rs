//! Command-line front end for the geometry calculator.
//!
//!   cnn-geometry example > net.json
//!   cnn-geometry compute net.json
//!   cnn-geometry compute net.json --format json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cnn_geometry::{report, ArchitectureSpec, InputShape};

#[derive(Parser)]
#[command(name = "cnn-geometry", version, about = "Output shape, receptive field and jump for a stack of CNN layers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the per-layer table for an architecture JSON file
    Compute {
        /// Path to a `{input, layers}` JSON file
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Write the VGG-like example architecture as JSON
    Example {
        #[arg(long, default_value_t = 32)]
        height: u32,
        #[arg(long, default_value_t = 32)]
        width: u32,
        #[arg(long, default_value_t = 3)]
        channels: u32,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> cnn_geometry::Result<()> {
    match command {
        Command::Compute { file, format } => {
            let spec = ArchitectureSpec::load_json(&file)?;
            let rows = spec.compute();

            for row in rows.iter().filter(|r| r.warning.is_some()) {
                warn!(layer = row.index, output = %row.output, "layer output is not positive");
            }

            match format {
                Format::Table => print!("{}", report::render_table(&rows)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
        }
        Command::Example { height, width, channels, output } => {
            let spec = ArchitectureSpec::example(InputShape::new(height, width, channels)?);
            match output {
                Some(path) => {
                    spec.save_json(&path)?;
                    info!("example architecture written to {}", path.display());
                }
                None => println!("{}", spec.to_json_pretty()?),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnn_geometry::GeometryError;

    #[test]
    fn example_then_compute_reads_back_the_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");

        run(Command::Example { height: 32, width: 32, channels: 3, output: Some(path.clone()) }).unwrap();
        assert_eq!(ArchitectureSpec::load_json(&path).unwrap().layers.len(), 8);

        run(Command::Compute { file: path.clone(), format: Format::Json }).unwrap();
        run(Command::Compute { file: path, format: Format::Table }).unwrap();
    }

    #[test]
    fn compute_on_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(Command::Compute { file: dir.path().join("absent.json"), format: Format::Table });
        assert!(matches!(result, Err(GeometryError::Io(_))));
    }

    #[test]
    fn example_rejects_zero_sized_input() {
        let result = run(Command::Example { height: 0, width: 32, channels: 3, output: None });
        assert!(matches!(result, Err(GeometryError::InvalidInputDimension { .. })));
    }

    #[test]
    fn compute_parses_format_flag() {
        let cli = Cli::try_parse_from(["cnn-geometry", "compute", "net.json", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Compute { format: Format::Json, .. }));
    }
}
