//! Batch line calling over pre-extracted detections.
//!
//! Reads a calibration JSON and an observations JSON, runs one tracking
//! session, logs every verdict, and writes the report JSON. With
//! `--ground-truth` it also scores the run against hand-labeled bounces.

use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{info, LevelFilter};
use thiserror::Error;

use linecall::eval::{evaluate, GroundTruthBounce, MATCH_WINDOW_S};
use linecall::records::ObservationRecord;
use linecall::{analyze, AnalyzeError, CalibrationRecord, DetectorParams};

#[derive(Parser)]
#[command(name = "linecall", version, about = "Bounce detection and line calling from ball-detection records")]
struct Args {
    /// Observation records JSON: an array of detector outputs in frame
    /// order.
    observations: PathBuf,

    /// Calibration record JSON (four pixel/court corner pairs).
    #[arg(long, short = 'c')]
    calibration: PathBuf,

    /// Source frame rate.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Source frame count, for the detection-rate statistic. Defaults to
    /// one past the last observed frame.
    #[arg(long)]
    total_frames: Option<u64>,

    /// Detector parameters JSON; defaults apply when omitted.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Report output path. Defaults to the observations path with a
    /// `.report.json` extension.
    #[arg(long, short = 'r')]
    report: Option<PathBuf>,

    /// Hand-labeled bounces JSON to score the run against.
    #[arg(long, short = 'g')]
    ground_truth: Option<PathBuf>,

    /// Log debug detail.
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize the report: {0}")]
    Serialize(serde_json::Error),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = StdError::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = linecall::core::init_with_level(level);

    let calibration: CalibrationRecord = read_json(&args.calibration)?;
    let observations: Vec<ObservationRecord> = read_json(&args.observations)?;
    let params: DetectorParams = match &args.params {
        Some(path) => read_json(path)?,
        None => DetectorParams::default(),
    };

    let total_frames = args
        .total_frames
        .or_else(|| observations.last().map(|o| o.frame_index + 1))
        .unwrap_or(0);

    let report = analyze(&observations, args.fps, total_frames, calibration, params)?;

    for bounce in &report.bounces {
        info!(
            "frame {:>6} {:7.2}s  ({:6.2}, {:6.2}) m  {}  {:+.3} m",
            bounce.frame_index,
            bounce.timestamp_s,
            bounce.court_x,
            bounce.court_y,
            if bounce.is_in { "IN " } else { "OUT" },
            bounce.distance_from_line_m,
        );
    }
    info!(
        "{} bounce(s): {} in, {} out ({} detection(s), {:.1}% of frames)",
        report.stats.total_bounces,
        report.stats.bounces_in,
        report.stats.bounces_out,
        report.stats.total_detections,
        report.stats.detection_rate * 100.0,
    );

    let report_path = args
        .report
        .unwrap_or_else(|| args.observations.with_extension("report.json"));
    let json = serde_json::to_string_pretty(&report).map_err(CliError::Serialize)?;
    fs::write(&report_path, json).map_err(|source| CliError::Write {
        path: report_path.clone(),
        source,
    })?;
    info!("report written to {}", report_path.display());

    if let Some(path) = &args.ground_truth {
        let labels: Vec<GroundTruthBounce> = read_json(path)?;
        let eval = evaluate(&report.bounces, &labels, MATCH_WINDOW_S);
        info!(
            "against {} label(s): recall {:.1}%, precision {:.1}%, F1 {:.1}%, call accuracy {:.1}%",
            labels.len(),
            eval.recall * 100.0,
            eval.precision * 100.0,
            eval.f1 * 100.0,
            eval.judgment_accuracy * 100.0,
        );
        for missed in &eval.missed {
            info!(
                "  missed bounce at frame {} ({:.2}s)",
                missed.frame_index, missed.timestamp_s
            );
        }
        for spurious in &eval.spurious {
            info!(
                "  spurious detection at frame {} ({:.2}s)",
                spurious.frame_index, spurious.timestamp_s
            );
        }
    }

    Ok(())
}
