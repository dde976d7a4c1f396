//! Comparative VSWR chart over the full sweep, band of interest shaded
//!
//! The backend follows the file extension: `.svg` gets a vector chart,
//! anything else a PNG. Text is rendered with a bundled DejaVu Sans so the
//! chart needs no system fonts.

use std::{error::Error as StdError, fs, path::Path};

use plotters::{coord::Shift, prelude::*};
use tracing::debug;

use crate::{
    band::Band,
    error::{Error, Result},
    vswr::VswrCurve,
};

pub const DEFAULT_PLOT_FILE: &str = "vswr_curves.png";

const PLOT_SIZE: (u32, u32) = (1800, 900);
const Y_FLOOR: f64 = 0.95;
// Keep one clamped or badly matched curve from flattening the rest
const Y_DISPLAY_CEILING: f64 = 10.0;
const X_TICK_GHZ: f64 = 0.1;

const FONT_FAMILY: &str = "sans-serif";
static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Make the bundled font available to every backend under `FONT_FAMILY`
fn register_fonts(path: &Path) -> Result<()> {
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES).map_err(|_| {
        Error::Plot {
            path: path.to_path_buf(),
            reason: "bundled font could not be loaded".to_owned(),
        }
    })
}

/// One line on the chart
pub struct PlotCurve<'a> {
    pub name: &'a str,
    pub curve: &'a VswrCurve,
    /// `None` for curves with no samples in the band
    pub score: Option<f64>,
}

impl PlotCurve<'_> {
    fn label(&self) -> String {
        match self.score {
            Some(score) => format!("{} (FoM {:.3})", self.name, score),
            None => format!("{} (out of band)", self.name),
        }
    }
}

struct Axes {
    x: (f64, f64),
    y_top: f64,
}

impl Axes {
    fn fit(band: Band, curves: &[PlotCurve]) -> Self {
        let mut x_min = band.fmin_hz() / 1e9;
        let mut x_max = band.fmax_hz() / 1e9;
        let mut y_max = 1.0f64;
        for p in curves.iter().flat_map(|c| c.curve.points.iter()) {
            x_min = x_min.min(p.freq_hz / 1e9);
            x_max = x_max.max(p.freq_hz / 1e9);
            y_max = y_max.max(p.vswr);
        }
        let y_top = (y_max.min(Y_DISPLAY_CEILING) * 1.05).max(1.1);
        Self {
            x: (x_min, x_max),
            y_top,
        }
    }

    fn x_ticks(&self) -> usize {
        let n = ((self.x.1 - self.x.0) / X_TICK_GHZ).round() as usize + 1;
        n.clamp(2, 40)
    }
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    band: Band,
    curves: &[PlotCurve],
) -> std::result::Result<(), Box<dyn StdError>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let axes = Axes::fit(band, curves);
    let (fmin, fmax) = (band.fmin_hz() / 1e9, band.fmax_hz() / 1e9);
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "VSWR vs frequency (band of interest shaded)",
            (FONT_FAMILY, 28),
        )
        .margin(20)
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(axes.x.0..axes.x.1, Y_FLOOR..axes.y_top)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (GHz)")
        .y_desc("VSWR")
        .x_labels(axes.x_ticks())
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .label_style((FONT_FAMILY, 18))
        .axis_desc_style((FONT_FAMILY, 22))
        .draw()?;

    // Band of interest
    chart.draw_series(std::iter::once(Rectangle::new(
        [(fmin, Y_FLOOR), (fmax, axes.y_top)],
        GREEN.mix(0.15).filled(),
    )))?;
    for edge in [fmin, fmax] {
        chart.draw_series(LineSeries::new(
            vec![(edge, Y_FLOOR), (edge, axes.y_top)],
            GREEN.mix(0.6).stroke_width(1),
        ))?;
    }

    for (idx, c) in curves.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let y_top = axes.y_top;
        chart
            .draw_series(LineSeries::new(
                c.curve
                    .points
                    .iter()
                    .map(|p| (p.freq_hz / 1e9, p.vswr.min(y_top))),
                color.stroke_width(2),
            ))?
            .label(c.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT_FAMILY, 16))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render every curve to `path`, creating its parent folder if needed
pub fn plot_curves(path: &Path, band: Band, curves: &[PlotCurve]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    let svg = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"));
    register_fonts(path)?;
    debug!(path = %path.display(), svg, curves = curves.len(), "Rendering chart");
    let drawn = if svg {
        draw(SVGBackend::new(path, PLOT_SIZE).into_drawing_area(), band, curves)
    } else {
        draw(BitMapBackend::new(path, PLOT_SIZE).into_drawing_area(), band, curves)
    };
    drawn.map_err(|e| Error::Plot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
