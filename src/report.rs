//! Text report ranking every file by its figure of merit

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    band::Band,
    error::{Error, Result},
    fom::{FomRecord, ScoreMethod},
};

pub const DEFAULT_REPORT_FILE: &str = "vswr_fom.txt";

const RULE_WIDTH: usize = 70;

/// RFC 3339 timestamp for the report footer
fn report_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub struct Report<'a> {
    pub band: Band,
    pub method: ScoreMethod,
    /// Already sorted best to worst
    pub ranked: &'a [FomRecord],
    /// Files with no samples in the band
    pub excluded: &'a [String],
}

impl<'a> Report<'a> {
    /// The table, plus a `Generated:` line when a time is given.
    /// Nothing else in the output depends on when it was produced.
    pub fn render(&self, generated: Option<DateTime<Utc>>) -> String {
        let mut out = self.to_string();
        if let Some(time) = generated {
            out.push_str(&format!("Generated: {}\n", report_timestamp(&time)));
        }
        out
    }

    pub fn best(&self) -> Option<&FomRecord> {
        self.ranked.first()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(
            f,
            "Figure of merit (band of interest: {:.3}-{:.3} GHz)",
            self.band.fmin_hz() / 1e9,
            self.band.fmax_hz() / 1e9
        )?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "{:<45} {:>10} {:>10} {:>8}",
            "File", "Mean VSWR", "Max VSWR", "Score"
        )?;
        writeln!(f, "{}", rule)?;
        for r in self.ranked {
            writeln!(
                f,
                "{:<45} {:>10.4} {:>10.4} {:>8.4}",
                r.name, r.mean_vswr, r.max_vswr, r.score
            )?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "Score: 1 = ideal (VSWR = 1 across band), {}. Lower mean/max VSWR is better.",
            self.method.describe()
        )?;
        match self.best() {
            Some(best) => writeln!(f, "Best in band: {} (score {:.4})", best.name, best.score)?,
            None => writeln!(f, "No file has samples in the band of interest.")?,
        }
        for name in self.excluded {
            writeln!(f, "Not ranked (no samples in band): {}", name)?;
        }
        Ok(())
    }
}

/// Write the rendered report into `dir`, creating it if needed
pub fn write_report(dir: &Path, file_name: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = dir.join(file_name);
    fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, mean_vswr: f64, max_vswr: f64, score: f64) -> FomRecord {
        FomRecord {
            name: name.to_owned(),
            mean_vswr,
            max_vswr,
            score,
            n_points: 10,
        }
    }

    #[test]
    fn test_render_layout() {
        let ranked = vec![
            record("ant1", 1.0, 1.0, 1.0),
            record("ant2", 1.5, 2.25, 0.75),
        ];
        let excluded = vec!["ant3".to_owned()];
        let report = Report {
            band: Band::default(),
            method: ScoreMethod::Mse,
            ranked: &ranked,
            excluded: &excluded,
        };
        let text = report.render(None);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Figure of merit (band of interest: 1.700-2.500 GHz)"
        );
        assert_eq!(lines[1], "-".repeat(70));
        assert!(lines[2].starts_with("File"));
        assert_eq!(
            lines[4],
            format!("{:<45} {:>10} {:>10} {:>8}", "ant1", "1.0000", "1.0000", "1.0000")
        );
        assert!(lines[5].starts_with("ant2"));
        assert!(text.contains("Best in band: ant1 (score 1.0000)"));
        assert!(text.contains("Not ranked (no samples in band): ant3"));
        assert!(!text.contains("Generated"));
    }

    #[test]
    fn test_timestamp_only_difference() {
        let ranked = vec![record("a", 1.2, 1.4, 0.9)];
        let report = Report {
            band: Band::default(),
            method: ScoreMethod::InverseMean,
            ranked: &ranked,
            excluded: &[],
        };
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let stamped = report.render(Some(time));
        assert!(stamped.ends_with("Generated: 2024-03-01T12:30:05Z\n"));
        assert!(stamped.starts_with(&report.render(None)));
    }

    #[test]
    fn test_empty_ranking() {
        let report = Report {
            band: Band::default(),
            method: ScoreMethod::Mse,
            ranked: &[],
            excluded: &[],
        };
        assert!(report
            .render(None)
            .contains("No file has samples in the band of interest."));
    }

    #[test]
    fn test_write_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let path = write_report(&out, DEFAULT_REPORT_FILE, "hello\n").unwrap();
        assert_eq!(path, out.join("vswr_fom.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "hello\n");
    }
}
