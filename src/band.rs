//! Band of interest used for scoring

use crate::{
    error::{Error, Result},
    vswr::{VswrCurve, VswrPoint},
};

pub const DEFAULT_FMIN_HZ: f64 = 1.7e9;
pub const DEFAULT_FMAX_HZ: f64 = 2.5e9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    fmin_hz: f64,
    fmax_hz: f64,
}

impl Default for Band {
    fn default() -> Self {
        Self {
            fmin_hz: DEFAULT_FMIN_HZ,
            fmax_hz: DEFAULT_FMAX_HZ,
        }
    }
}

impl Band {
    pub fn new(fmin_hz: f64, fmax_hz: f64) -> Result<Self> {
        if !fmin_hz.is_finite() || !fmax_hz.is_finite() || fmin_hz >= fmax_hz {
            return Err(Error::InvalidBand {
                fmin: fmin_hz,
                fmax: fmax_hz,
            });
        }
        Ok(Self { fmin_hz, fmax_hz })
    }

    pub fn fmin_hz(&self) -> f64 {
        self.fmin_hz
    }

    pub fn fmax_hz(&self) -> f64 {
        self.fmax_hz
    }

    pub fn contains(&self, freq_hz: f64) -> bool {
        freq_hz >= self.fmin_hz && freq_hz <= self.fmax_hz
    }

    /// The contiguous run of samples inside `[fmin, fmax]`, empty if none are.
    ///
    /// Curves are strictly increasing in frequency, so this is two binary searches.
    pub fn select<'a>(&self, curve: &'a VswrCurve) -> &'a [VswrPoint] {
        let points = &curve.points;
        let start = points.partition_point(|p| p.freq_hz < self.fmin_hz);
        let end = points.partition_point(|p| p.freq_hz <= self.fmax_hz);
        &points[start..end.max(start)]
    }
}
