#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the patient intake robot.
//!
//! ```text
//! intake_robot extract <PDF> [--min-confidence 0.75]
//! intake_robot filename <PDF>
//! intake_robot archive <PDF> [--dest archive/]
//! intake_robot sample [DIR]
//! ```
//!
//! A `--config intake.toml` file can supply defaults for the threshold and
//! directories. Logging is controlled with `RUST_LOG`.

mod archive;
mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use intake_robot::{PatientRecord, extract_patient_fields, format_filename};

use crate::config::IntakeConfig;

const DEFAULT_ARCHIVE_DIR: &str = "archive";
const DEFAULT_SAMPLE_DIR: &str = "samples";

#[derive(Parser)]
#[command(
    name = "intake_robot",
    about = "Extract and file patient intake PDFs"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the extracted patient fields as JSON
    Extract {
        /// Intake PDF to read
        pdf: PathBuf,
        /// Exit with an error when confidence is below this value
        #[arg(long)]
        min_confidence: Option<f64>,
    },
    /// Print the archive filename for an intake PDF
    Filename {
        /// Intake PDF to read
        pdf: PathBuf,
    },
    /// Copy an intake PDF into the archive under its derived filename
    Archive {
        /// Intake PDF to read
        pdf: PathBuf,
        /// Archive directory
        #[arg(long)]
        dest: Option<PathBuf>,
    },
    /// Write a sample intake PDF if one does not exist yet
    Sample {
        /// Directory for the sample
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("confidence {confidence:.2} is below the required {threshold:.2}")]
struct BelowThreshold {
    confidence: f64,
    threshold: f64,
}

/// Fails when a threshold is set and `record` scores below it.
fn check_confidence(record: &PatientRecord, threshold: Option<f64>) -> Result<(), BelowThreshold> {
    match threshold {
        Some(threshold) if record.confidence < threshold => Err(BelowThreshold {
            confidence: record.confidence,
            threshold,
        }),
        _ => Ok(()),
    }
}

fn extract(pdf: &Path, threshold: Option<f64>) -> Result<(), Box<dyn std::error::Error>> {
    let record = extract_patient_fields(pdf)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::Value::Object(record.to_payload()))?
    );
    check_confidence(&record, threshold)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => IntakeConfig::load(path)?,
        None => IntakeConfig::default(),
    };

    match cli.command {
        Commands::Extract {
            pdf,
            min_confidence,
        } => extract(&pdf, min_confidence.or(config.min_confidence))?,
        Commands::Filename { pdf } => {
            let record = extract_patient_fields(&pdf)?;
            println!("{}", format_filename(&record));
        }
        Commands::Archive { pdf, dest } => {
            let dest_dir = dest
                .or(config.archive_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_DIR));
            let record = extract_patient_fields(&pdf)?;
            let archived = archive::archive_document(&pdf, &dest_dir, &record)?;
            println!("{}", archived.display());
        }
        Commands::Sample { dir } => {
            let dir = dir
                .or(config.sample_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_DIR));
            let sample = intake_robot_pdf::sample::ensure_sample_pdf(&dir)?;
            println!("{}", sample.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
