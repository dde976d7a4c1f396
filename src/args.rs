//! Argument parsing for running from the command line

use std::path::PathBuf;

use clap::Parser;

use crate::{
    band::Band,
    error::Result,
    fom::ScoreMethod,
    plot::DEFAULT_PLOT_FILE,
    report::DEFAULT_REPORT_FILE,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Minimum frequency of interest in Hz
    #[clap(long, default_value_t = crate::band::DEFAULT_FMIN_HZ, value_name = "Hz")]
    pub fmin: f64,
    /// Maximum frequency of interest in Hz
    #[clap(long, default_value_t = crate::band::DEFAULT_FMAX_HZ, value_name = "Hz")]
    pub fmax: f64,
    /// Folder containing .ini measurement files
    #[clap(short, long, default_value = "input")]
    pub input: PathBuf,
    /// Folder for all outputs: plot and FOM report
    #[clap(short, long, default_value = "output")]
    pub output: PathBuf,
    /// Plot file name inside the output folder (.svg for a vector chart)
    #[clap(long, default_value = DEFAULT_PLOT_FILE)]
    pub plot_file: String,
    /// Report file name inside the output folder
    #[clap(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: String,
    /// Score formula used to rank files
    #[clap(long, value_enum, default_value = "mse")]
    pub score: ScoreMethod,
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

impl Args {
    pub fn band(&self) -> Result<Band> {
        Band::new(self.fmin, self.fmax)
    }
}

/// Match verbosity filter with tracing subscriber log levels
pub fn convert_filter(filter: log::LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    match filter {
        log::LevelFilter::Off => tracing_subscriber::filter::LevelFilter::OFF,
        log::LevelFilter::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        log::LevelFilter::Warn => tracing_subscriber::filter::LevelFilter::WARN,
        log::LevelFilter::Info => tracing_subscriber::filter::LevelFilter::INFO,
        log::LevelFilter::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
        log::LevelFilter::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
    }
}
