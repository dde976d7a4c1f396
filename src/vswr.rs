//! Reflection coefficient to VSWR conversion

use tracing::warn;

use crate::sweep::Sweep;

/// Finite stand-in for VSWR where |Γ| >= 1 (or close enough to blow past it)
pub const VSWR_CEILING: f64 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VswrPoint {
    pub freq_hz: f64,
    pub vswr: f64,
}

/// VSWR over the same frequency axis as the sweep it came from
#[derive(Clone, Debug, PartialEq, Default)]
pub struct VswrCurve {
    pub points: Vec<VswrPoint>,
}

impl VswrCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_vswr(&self) -> Option<f64> {
        self.points.iter().map(|p| p.vswr).reduce(f64::max)
    }
}

/// VSWR = (1 + |Γ|) / (1 - |Γ|), clamped to [1, VSWR_CEILING]
pub fn vswr_from_magnitude(mag: f64) -> f64 {
    let mag = mag.abs();
    if mag >= 1.0 {
        return VSWR_CEILING;
    }
    ((1.0 + mag) / (1.0 - mag)).min(VSWR_CEILING)
}

/// Convert a whole sweep, warning once if any samples hit the ceiling
pub fn convert(name: &str, sweep: &Sweep) -> VswrCurve {
    let mut clamped = 0usize;
    let points = sweep
        .points()
        .iter()
        .map(|p| {
            let vswr = vswr_from_magnitude(p.gamma.norm());
            if vswr >= VSWR_CEILING {
                clamped += 1;
            }
            VswrPoint {
                freq_hz: p.freq_hz,
                vswr,
            }
        })
        .collect();
    if clamped > 0 {
        warn!(
            "{}: {} of {} samples have |S11| too close to or above 1, VSWR clamped to {}",
            name,
            clamped,
            sweep.len(),
            VSWR_CEILING
        );
    }
    VswrCurve { points }
}
