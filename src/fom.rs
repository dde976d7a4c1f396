//! Figure of merit: how close a curve stays to VSWR = 1 across the band

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::vswr::VswrPoint;

/// Score formula. Both give 1 for a perfect match and decrease as VSWR grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScoreMethod {
    /// 1 / (1 + mean((VSWR - 1)^2))
    Mse,
    /// 1 / mean(VSWR)
    InverseMean,
}

impl ScoreMethod {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Mse => "score = 1 / (1 + mean((VSWR - 1)^2))",
            Self::InverseMean => "score = 1 / mean(VSWR)",
        }
    }

    fn score(self, band: &[VswrPoint], mean_vswr: f64) -> f64 {
        match self {
            Self::Mse => {
                let mse = band.iter().map(|p| (p.vswr - 1.0).powi(2)).sum::<f64>()
                    / band.len() as f64;
                1.0 / (1.0 + mse)
            }
            Self::InverseMean => 1.0 / mean_vswr,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FomRecord {
    pub name: String,
    pub mean_vswr: f64,
    pub max_vswr: f64,
    pub score: f64,
    pub n_points: usize,
}

impl FomRecord {
    /// `None` if the band holds no samples
    pub fn compute(name: &str, band: &[VswrPoint], method: ScoreMethod) -> Option<Self> {
        if band.is_empty() {
            return None;
        }
        let n_points = band.len();
        let mean_vswr = band.iter().map(|p| p.vswr).sum::<f64>() / n_points as f64;
        let max_vswr = band.iter().map(|p| p.vswr).fold(f64::MIN, f64::max);
        Some(Self {
            name: name.to_owned(),
            mean_vswr,
            max_vswr,
            score: method.score(band, mean_vswr),
            n_points,
        })
    }
}

/// Best first: higher score, then lower max VSWR, then name
fn compare(a: &FomRecord, b: &FomRecord) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.max_vswr.total_cmp(&b.max_vswr))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn rank(mut records: Vec<FomRecord>) -> Vec<FomRecord> {
    records.sort_by(compare);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(vswr: &[f64]) -> Vec<VswrPoint> {
        vswr.iter()
            .enumerate()
            .map(|(i, &vswr)| VswrPoint {
                freq_hz: 1.7e9 + i as f64 * 1e8,
                vswr,
            })
            .collect()
    }

    #[test]
    fn test_perfect_curve() {
        for method in [ScoreMethod::Mse, ScoreMethod::InverseMean] {
            let fom = FomRecord::compute("ant1", &band(&[1.0; 9]), method).unwrap();
            assert_eq!(fom.mean_vswr, 1.0);
            assert_eq!(fom.max_vswr, 1.0);
            assert_eq!(fom.score, 1.0);
            assert_eq!(fom.n_points, 9);
        }
    }

    #[test]
    fn test_values() {
        let fom = FomRecord::compute("a", &band(&[1.0, 2.0, 3.0]), ScoreMethod::Mse).unwrap();
        assert_eq!(fom.mean_vswr, 2.0);
        assert_eq!(fom.max_vswr, 3.0);
        // mse = (0 + 1 + 4) / 3
        assert!((fom.score - 1.0 / (1.0 + 5.0 / 3.0)).abs() < 1e-12);
        let fom = FomRecord::compute("a", &band(&[1.0, 2.0, 3.0]), ScoreMethod::InverseMean)
            .unwrap();
        assert_eq!(fom.score, 0.5);
    }

    #[test]
    fn test_empty_band() {
        assert!(FomRecord::compute("a", &[], ScoreMethod::Mse).is_none());
    }

    #[test]
    fn test_monotonic() {
        let lower = [1.1, 1.4, 1.9, 2.2, 1.3];
        let higher = [1.2, 1.4, 2.5, 2.2, 1.8];
        for method in [ScoreMethod::Mse, ScoreMethod::InverseMean] {
            let a = FomRecord::compute("a", &band(&lower), method).unwrap();
            let b = FomRecord::compute("b", &band(&higher), method).unwrap();
            assert!(a.score >= b.score);
            assert!(a.score <= 1.0 && b.score > 0.0);
        }
    }

    #[test]
    fn test_rank_ties() {
        let rec = |name: &str, score, max_vswr| FomRecord {
            name: name.to_owned(),
            mean_vswr: 1.5,
            max_vswr,
            score,
            n_points: 1,
        };
        let ranked = rank(vec![
            rec("c", 0.5, 2.0),
            rec("b", 0.5, 1.8),
            rec("a", 0.9, 3.0),
            rec("d", 0.5, 1.8),
        ]);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "d", "c"]);
    }
}
