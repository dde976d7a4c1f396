//! Discover and parse measurement files from the input folder
//!
//! Two layouts are understood. The analyzer's own export lists points in a
//! `[Curve]` section as `F:<freq>,<value>[,<value>]`, interpreted through an
//! optional `Format` key (VSWR, RI, MA or DB). Hand-built files may instead
//! carry comma-separated columns in an `[S11]` section.
//!
//! A file that can't be read or parsed is skipped with a warning; only a
//! missing folder, or a folder with nothing usable in it, stops the run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    complex::Gamma,
    error::{Error, ParseError, Result},
    ini::{Document, Section},
    sweep::{Measurement, Sweep, SweepPoint},
};

pub const CURVE_SECTION: &str = "Curve";
pub const COLUMN_SECTION: &str = "S11";

/// How the values attached to each frequency are interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    /// VSWR directly, one value
    Vswr,
    /// Real, imaginary
    RealImag,
    /// Linear magnitude, phase in degrees
    MagAngle,
    /// Magnitude in dB, phase in degrees
    DbAngle,
}

impl DataFormat {
    fn from_key(s: &str) -> std::result::Result<Self, ParseError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VSWR" | "SWR" => Ok(Self::Vswr),
            "RI" => Ok(Self::RealImag),
            "MA" => Ok(Self::MagAngle),
            "DB" => Ok(Self::DbAngle),
            _ => Err(ParseError::UnknownFormat(s.trim().to_owned())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Vswr => "VSWR",
            Self::RealImag => "RI",
            Self::MagAngle => "MA",
            Self::DbAngle => "DB",
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Self::Vswr => 1,
            _ => 2,
        }
    }

    /// Turn one row of values into a reflection coefficient
    fn to_gamma(self, index: usize, values: &[f64]) -> std::result::Result<Gamma, ParseError> {
        match (self, values) {
            (Self::Vswr, &[v]) => {
                if v < 1.0 {
                    return Err(ParseError::InvalidVswr { index, value: v });
                }
                Ok(Gamma::new((v - 1.0) / (v + 1.0), 0.0))
            }
            (Self::RealImag, &[re, im]) => Ok(Gamma::new(re, im)),
            (Self::MagAngle, &[mag, deg]) => Ok(Gamma::from_polar_deg(mag, deg)),
            (Self::DbAngle, &[db, deg]) => Ok(Gamma::from_polar_deg(10f64.powf(db / 20.0), deg)),
            _ => Err(ParseError::FormatColumns {
                format: self.name(),
                expected: self.columns(),
                found: values.len(),
            }),
        }
    }
}

fn parse_num(line: usize, s: &str) -> std::result::Result<f64, ParseError> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseError::InvalidNumber {
            line,
            value: s.to_owned(),
        }),
    }
}

/// Comma-separated numbers; a single trailing comma is tolerated, any other
/// empty field is an error so columns can't silently shift against each other
fn parse_list(line: usize, s: &str) -> std::result::Result<Vec<f64>, ParseError> {
    let mut fields: Vec<&str> = s.split(',').collect();
    if fields.len() > 1 && fields.last().map_or(false, |f| f.trim().is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(|v| parse_num(line, v)).collect()
}

/// Parse the text of one measurement file into a sweep
pub fn parse_sweep(text: &str) -> std::result::Result<Sweep, ParseError> {
    let doc = Document::parse(text);
    let format = doc
        .find_key(CURVE_SECTION, "Format")
        .map(DataFormat::from_key)
        .transpose()?;
    if let Some(curve) = doc.section(CURVE_SECTION) {
        if curve.raw_lines().next().is_some() {
            return parse_points(curve, format);
        }
    }
    match doc.section(COLUMN_SECTION) {
        Some(columns) => parse_columns(columns, format),
        None => Err(ParseError::NoCurveData),
    }
}

fn parse_points(
    curve: &Section,
    format: Option<DataFormat>,
) -> std::result::Result<Sweep, ParseError> {
    let mut format = format;
    let mut points = Vec::new();
    for (line, text) in curve.raw_lines() {
        let body = match text.strip_prefix("F:") {
            Some(body) => body,
            None => {
                debug!(line, text, "Ignoring non-point line in curve section");
                continue;
            }
        };
        let mut fields = body.split(',');
        let freq_hz = match fields.next() {
            Some(f) if !f.trim().is_empty() => parse_num(line, f)?,
            _ => {
                return Err(ParseError::MalformedPoint {
                    line,
                    text: text.to_owned(),
                })
            }
        };
        let values = fields
            .map(|v| parse_num(line, v))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        // Without an explicit format, the first point decides
        let fmt = match format {
            Some(fmt) => fmt,
            None => {
                let inferred = match values.len() {
                    1 => DataFormat::Vswr,
                    2 => DataFormat::RealImag,
                    _ => {
                        return Err(ParseError::MalformedPoint {
                            line,
                            text: text.to_owned(),
                        })
                    }
                };
                format = Some(inferred);
                inferred
            }
        };
        if values.len() != fmt.columns() {
            return Err(ParseError::InconsistentColumns {
                line,
                expected: fmt.columns(),
                found: values.len(),
            });
        }
        let gamma = fmt.to_gamma(points.len(), &values)?;
        points.push(SweepPoint { freq_hz, gamma });
    }
    Sweep::new(points)
}

fn required_list(
    section: &Section,
    key: &'static str,
) -> std::result::Result<Vec<f64>, ParseError> {
    let (line, value) = section.entry(key).ok_or(ParseError::MissingKey(key))?;
    parse_list(line, value)
}

fn parse_columns(
    section: &Section,
    format: Option<DataFormat>,
) -> std::result::Result<Sweep, ParseError> {
    let freqs = required_list(section, "Frequency")?;
    let has = |key: &str| section.entry(key).is_some();
    let fmt = match format {
        Some(fmt) => fmt,
        None if has("Real") || has("Imag") => DataFormat::RealImag,
        None if has("Magnitude") => DataFormat::MagAngle,
        None if has("LogMag") => DataFormat::DbAngle,
        None if has("VSWR") => DataFormat::Vswr,
        None => return Err(ParseError::MissingKey("Real/Imag, Magnitude/Phase or LogMag/Phase")),
    };
    let columns = match fmt {
        DataFormat::Vswr => vec![required_list(section, "VSWR")?],
        DataFormat::RealImag => vec![
            required_list(section, "Real")?,
            required_list(section, "Imag")?,
        ],
        DataFormat::MagAngle => vec![
            required_list(section, "Magnitude")?,
            required_list(section, "Phase")?,
        ],
        DataFormat::DbAngle => vec![
            required_list(section, "LogMag")?,
            required_list(section, "Phase")?,
        ],
    };
    if let Some(bad) = columns.iter().find(|c| c.len() != freqs.len()) {
        return Err(ParseError::LengthMismatch {
            frequencies: freqs.len(),
            samples: bad.len(),
        });
    }
    let points = freqs
        .iter()
        .enumerate()
        .map(|(i, &freq_hz)| {
            let row: Vec<f64> = columns.iter().map(|c| c[i]).collect();
            fmt.to_gamma(i, &row)
                .map(|gamma| SweepPoint { freq_hz, gamma })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Sweep::new(points)
}

fn is_ini(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ini"))
}

/// List the `.ini` files in `dir`, sorted by name
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::MissingInputDir(dir.to_path_buf()));
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if is_ini(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Read and parse a single measurement file
pub fn load_file(path: &Path) -> Result<Measurement> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let sweep = parse_sweep(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Measurement { name, sweep })
}

/// Load every parsable measurement in `dir`, in discovery order
pub fn load_dir(dir: &Path) -> Result<Vec<Measurement>> {
    let paths = discover(dir)?;
    if paths.is_empty() {
        return Err(Error::NoInputFiles(dir.to_path_buf()));
    }
    let mut measurements = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_file(path) {
            Ok(m) => {
                debug!(name = %m.name, points = m.sweep.len(), "Loaded sweep");
                measurements.push(m);
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    if measurements.is_empty() {
        return Err(Error::NoValidData(dir.to_path_buf()));
    }
    info!(
        "Loaded {} of {} measurement files from {}",
        measurements.len(),
        paths.len(),
        dir.display()
    );
    Ok(measurements)
}
