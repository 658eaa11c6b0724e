//! Detector pipeline
//!
//! parse → build → propagate → rank → report, strictly in sequence.

use crate::app::builder::{BuildError, BuildOutcome, build_graph};
use crate::app::reporter::{Report, build_report};
use crate::domain::config::{ConfigError, DetectorConfig};
use crate::domain::growth::AllocError;
use crate::domain::risk::propagate_risk;
use crate::infra::report_io::save_report;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum DetectorError {
    /// An input file cannot be opened
    #[error("cannot open input file {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input content is unreadable or invalid
    #[error(transparent)]
    Build(BuildError),

    /// Storage could not grow
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The report cannot be written
    #[error("cannot write output file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<BuildError> for DetectorError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Alloc(alloc) => Self::Alloc(alloc),
            other => Self::Build(other),
        }
    }
}

/// Rank and classify the population of already-open streams
///
/// An empty population or a contact stream without header yields an empty
/// report.
pub fn analyze<P: BufRead, C: BufRead>(
    population: P,
    contacts: C,
    config: &DetectorConfig,
) -> Result<Report, DetectorError> {
    config.validate()?;

    match build_graph(population, contacts, config.parse_policy)? {
        BuildOutcome::EmptyPopulation => Ok(Report::empty()),
        BuildOutcome::NoMeetings { population } => {
            tracing::debug!(population, "no meetings recorded, report is empty");
            Ok(Report::empty())
        }
        BuildOutcome::Graph(mut graph) => {
            propagate_risk(&mut graph.store, graph.root, &config.calibration)?;
            let report = build_report(&graph.store, &config.thresholds)?;
            graph.store.release();
            Ok(report)
        }
    }
}

/// Open an input file for buffered reading
pub fn open_input(path: impl AsRef<Path>) -> Result<BufReader<File>, DetectorError> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DetectorError::Input {
            path: path.to_path_buf(),
            source,
        })
}

/// Run the detector on two input files and save the report to `output`
///
/// Both inputs are opened before anything is read, and the output file is
/// only created once the whole report is ready.
pub fn run_files(
    people_path: impl AsRef<Path>,
    meetings_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &DetectorConfig,
) -> Result<Report, DetectorError> {
    let people = open_input(people_path)?;
    let meetings = open_input(meetings_path)?;

    let report = analyze(people, meetings, config)?;

    let output_path = output_path.as_ref();
    save_report(output_path, &report).map_err(|source| DetectorError::Output {
        path: output_path.to_path_buf(),
        source,
    })?;

    Ok(report)
}
