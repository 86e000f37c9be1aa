//! Batch conversion of a statement folder.

use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use pdfields_core::pipeline::{usage, Invocation, Pipeline};
use pdfields_core::sink::{DirectorySink, SUMMARY_FILE};

use super::config;

/// Arguments for a batch run.
#[derive(Args)]
pub struct BatchArgs {
    /// Input folder with the PDFs, then the output folder
    #[arg(value_name = "FOLDER")]
    pub paths: Vec<String>,

    /// Rendering format: text, html or xml
    #[arg(short, long)]
    pub format: Option<String>,

    /// Pages to render, e.g. "1-3,5"
    #[arg(long)]
    pub pages: Option<String>,

    /// Password for encrypted statements
    #[arg(long)]
    pub password: Option<String>,

    /// Character encoding of the written text
    #[arg(long)]
    pub encoding: Option<String>,

    /// Re-parse the PDF for every page
    #[arg(long)]
    pub no_cache: bool,

    /// Leave fields without a rule out of the results
    #[arg(long)]
    pub skip_pending: bool,

    /// Do not write the rendered text
    #[arg(long)]
    pub no_text: bool,

    /// Do not write per-statement JSON records
    #[arg(long)]
    pub no_json: bool,

    /// Also write a summary CSV
    #[arg(long)]
    pub summary: bool,

    /// Continue on error
    #[arg(long)]
    pub continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();

    let invocation = match Invocation::from_args(&args.paths) {
        Ok(invocation) => invocation,
        Err(e) => {
            let program = std::env::args().next().unwrap_or_else(|| "pdfields".to_string());
            println!("{}", usage(&program));
            eprintln!("{} {}", style("✗").red(), e);
            return Ok(ExitCode::from(2));
        }
    };

    // Load configuration
    let mut config = config::load(config_path)?;
    config::apply_overrides(&mut config, &args);

    let pipeline = Pipeline::from_config(&config)?.with_continue_on_error(args.continue_on_error);
    let encoding = pipeline.options().encoding()?;

    let mut sink = DirectorySink::new(&invocation.output)
        .with_encoding(encoding)
        .with_text(config.output.write_text)
        .with_json(config.output.write_json)
        .with_summary(config.output.summary);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let report = pipeline.run_with_progress(&invocation, &mut sink, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.index as u64);
        if !progress.ok {
            pb.println(format!("{} {}", style("✗").red(), progress.file_name));
        }
    })?;

    pb.finish_and_clear();
    debug!("Input resolved to {}", report.input_dir.display());

    // Print summary
    println!(
        "{} Processed {} of {} files in {:?}",
        style("✓").green(),
        report.processed,
        report.discovered,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(report.processed).green(),
        style(report.failures.len()).red()
    );
    println!("   Output written to {}", invocation.output.display());

    if config.output.summary {
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            invocation.output.join(SUMMARY_FILE).display()
        );
    }

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (name, error) in &report.failures {
            println!("  - {}: {}", name, error);
        }
    }

    Ok(ExitCode::SUCCESS)
}
