//! Rank antennas by how well they match over a band of interest, from S11
//! sweeps exported by a KC901V network analyzer.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

pub mod args;
pub mod band;
pub mod complex;
pub mod error;
pub mod fom;
pub mod ini;
pub mod loader;
pub mod plot;
pub mod report;
pub mod sweep;
pub mod vswr;

pub use error::{Error, ParseError, Result};

use crate::{
    args::Args,
    fom::FomRecord,
    plot::PlotCurve,
    report::Report,
    vswr::VswrCurve,
};

/// What a run produced
#[derive(Debug)]
pub struct Outcome {
    pub ranked: Vec<FomRecord>,
    pub excluded: Vec<String>,
    pub plot_path: PathBuf,
    pub report_path: PathBuf,
    /// Report text without the timestamp line
    pub summary: String,
}

/// Load, convert, score, plot and report
pub fn run(args: &Args) -> Result<Outcome> {
    let band = args.band()?;
    let measurements = loader::load_dir(&args.input)?;

    let curves: Vec<VswrCurve> = measurements
        .iter()
        .map(|m| vswr::convert(&m.name, &m.sweep))
        .collect();

    let mut scores = Vec::with_capacity(curves.len());
    let mut records = Vec::new();
    let mut excluded = Vec::new();
    for (m, curve) in measurements.iter().zip(&curves) {
        match FomRecord::compute(&m.name, band.select(curve), args.score) {
            Some(fom) => {
                scores.push(Some(fom.score));
                records.push(fom);
            }
            None => {
                let span = m
                    .sweep
                    .span_hz()
                    .map(|(lo, hi)| format!("{:.3}-{:.3} GHz", lo / 1e9, hi / 1e9))
                    .unwrap_or_default();
                warn!(
                    "{}: no samples in band of interest (sweep covers {}), not ranked",
                    m.name, span
                );
                scores.push(None);
                excluded.push(m.name.clone());
            }
        }
    }
    let ranked = fom::rank(records);

    let plot_path = args.output.join(&args.plot_file);
    let plot_curves: Vec<PlotCurve> = measurements
        .iter()
        .zip(&curves)
        .zip(scores)
        .map(|((m, curve), score)| PlotCurve {
            name: &m.name,
            curve,
            score,
        })
        .collect();
    plot::plot_curves(&plot_path, band, &plot_curves)?;
    info!("Wrote chart to {}", plot_path.display());

    let report = Report {
        band,
        method: args.score,
        ranked: &ranked,
        excluded: &excluded,
    };
    let report_path = report::write_report(
        &args.output,
        &args.report_file,
        &report.render(Some(Utc::now())),
    )?;
    info!("Wrote report to {}", report_path.display());
    let summary = report.render(None);

    Ok(Outcome {
        ranked,
        excluded,
        plot_path,
        report_path,
        summary,
    })
}
