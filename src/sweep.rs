//! Measured S11 sweeps as they come out of the loader

use crate::{complex::Gamma, error::ParseError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPoint {
    pub freq_hz: f64,
    pub gamma: Gamma,
}

/// One frequency sweep, frequencies strictly increasing
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    points: Vec<SweepPoint>,
}

impl Sweep {
    /// Validates that the sweep is non-empty, finite and strictly increasing in frequency
    pub fn new(points: Vec<SweepPoint>) -> Result<Self, ParseError> {
        if points.is_empty() {
            return Err(ParseError::NoCurveData);
        }
        let mut prev = f64::NEG_INFINITY;
        for (index, p) in points.iter().enumerate() {
            if !p.freq_hz.is_finite() || !p.gamma.is_finite() {
                return Err(ParseError::NonFinite { index });
            }
            if p.freq_hz <= prev {
                return Err(ParseError::NonIncreasingFrequency {
                    index,
                    freq_hz: p.freq_hz,
                });
            }
            prev = p.freq_hz;
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Captured frequency range, if any
    pub fn span_hz(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.freq_hz, self.points.last()?.freq_hz))
    }
}

/// A sweep plus the file stem it was loaded from
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub sweep: Sweep,
}
