use anyhow::Context;
use clap::Parser;
use vswr_fom::args::{convert_filter, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // Logs go to stderr so stdout only carries the summary table
    tracing_subscriber::fmt()
        .with_max_level(convert_filter(args.verbose.log_level_filter()))
        .with_writer(std::io::stderr)
        .init();

    let outcome = vswr_fom::run(&args).context("VSWR analysis failed")?;

    println!();
    print!("{}", outcome.summary);
    println!(
        "\nAll outputs written to {}:",
        args.output
            .canonicalize()
            .unwrap_or_else(|_| args.output.clone())
            .display()
    );
    for path in [&outcome.plot_path, &outcome.report_path] {
        if let Some(name) = path.file_name() {
            println!("  - {}", name.to_string_lossy());
        }
    }
    Ok(())
}
