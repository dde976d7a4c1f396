use std::{fs, path::Path};

use clap::Parser;
use vswr_fom::{args::Args, run, Error};

/// `F:` point lines with a constant reflection coefficient (real, imag)
fn write_ri(dir: &Path, name: &str, start_hz: u64, stop_hz: u64, re: f64) {
    let mut text = String::from("[Setting]\nDevice=KC901V\nFormat=RI\n\n[Curve]\n");
    let step = 50_000_000u64;
    let mut f = start_hz;
    while f <= stop_hz {
        text.push_str(&format!("F:{},{},0\n", f, re));
        f += step;
    }
    fs::write(dir.join(format!("{}.ini", name)), text).unwrap();
}

fn args(input: &Path, output: &Path, extra: &[&str]) -> Args {
    let mut argv = vec![
        "vswr_fom".to_owned(),
        "--input".to_owned(),
        input.display().to_string(),
        "--output".to_owned(),
        output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::parse_from(argv)
}

#[test]
fn perfect_match_ranks_first() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    write_ri(&input, "ant1", 1_000_000_000, 3_000_000_000, 0.0);
    write_ri(&input, "ant2", 1_000_000_000, 3_000_000_000, 0.2);

    let outcome = run(&args(&input, &output, &[])).unwrap();

    let best = &outcome.ranked[0];
    assert_eq!(best.name, "ant1");
    assert_eq!(best.mean_vswr, 1.0);
    assert_eq!(best.max_vswr, 1.0);
    assert_eq!(best.score, 1.0);
    // 1.70 to 2.50 GHz in 50 MHz steps
    assert_eq!(best.n_points, 17);
    assert_eq!(outcome.ranked[1].name, "ant2");
    assert!((outcome.ranked[1].mean_vswr - 1.5).abs() < 1e-9);

    assert_eq!(outcome.report_path, output.join("vswr_fom.txt"));
    assert_eq!(outcome.plot_path, output.join("vswr_curves.png"));
    assert!(fs::metadata(&outcome.plot_path).unwrap().len() > 0);
    let report = fs::read_to_string(&outcome.report_path).unwrap();
    assert!(report.starts_with(&outcome.summary));
    assert!(report.contains("Best in band: ant1 (score 1.0000)"));
}

#[test]
fn mismatched_lengths_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    write_ri(&input, "good", 1_500_000_000, 2_600_000_000, 0.1);
    fs::write(
        input.join("bad.ini"),
        "[S11]\nFrequency=1.7e9,1.8e9,1.9e9\nReal=0.1,0.1\nImag=0,0,0\n",
    )
    .unwrap();

    let outcome = run(&args(&input, &output, &[])).unwrap();
    let names: Vec<_> = outcome.ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["good"]);
    assert!(!outcome.summary.contains("bad"));
}

#[test]
fn out_of_band_file_is_plotted_not_ranked() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir(&input).unwrap();
    write_ri(&input, "wide", 1_000_000_000, 3_000_000_000, 0.1);
    write_ri(&input, "low", 400_000_000, 900_000_000, 0.1);

    let outcome = run(&args(&input, &output, &["--plot-file", "chart.svg"])).unwrap();
    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.excluded, vec!["low".to_owned()]);
    assert!(outcome
        .summary
        .contains("Not ranked (no samples in band): low"));
    let svg = fs::read_to_string(output.join("chart.svg")).unwrap();
    assert!(svg.contains("low (out of band)"));
}

#[test]
fn reports_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir(&input).unwrap();
    write_ri(&input, "a", 1_000_000_000, 3_000_000_000, 0.3);
    write_ri(&input, "b", 1_000_000_000, 3_000_000_000, 0.05);
    write_ri(&input, "c", 1_000_000_000, 3_000_000_000, 0.15);

    let strip = |text: String| -> String {
        text.lines()
            .filter(|l| !l.starts_with("Generated:"))
            .map(|l| format!("{}\n", l))
            .collect()
    };
    let first = run(&args(&input, &dir.path().join("one"), &[])).unwrap();
    let second = run(&args(&input, &dir.path().join("two"), &[])).unwrap();
    assert_eq!(
        strip(fs::read_to_string(first.report_path).unwrap()),
        strip(fs::read_to_string(second.report_path).unwrap())
    );
    let order: Vec<_> = first.ranked.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["b", "c", "a"]);
}

#[test]
fn fatal_errors() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output");

    let missing = dir.path().join("missing");
    assert!(matches!(
        run(&args(&missing, &output, &[])),
        Err(Error::MissingInputDir(_))
    ));

    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();
    assert!(matches!(
        run(&args(&empty, &output, &[])),
        Err(Error::NoInputFiles(_))
    ));

    write_ri(&empty, "ant1", 1_000_000_000, 3_000_000_000, 0.0);
    assert!(matches!(
        run(&args(&empty, &output, &["--fmin", "2.5e9", "--fmax", "1.7e9"])),
        Err(Error::InvalidBand { .. })
    ));
    assert!(!output.exists());
}
