//! cfstruct - check a YAML dataset template.

use anyhow::{Context, Result};
use cfstruct::DatasetTemplate;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cfstruct")]
#[command(about = "Validate a CF/ACDD dataset template", long_about = None)]
struct Args {
    /// Path to the YAML dataset template
    template: PathBuf,

    /// Check global attributes against ACDD 1.3
    #[arg(long)]
    acdd: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting cfstruct");
    }

    let template = DatasetTemplate::from_file(&args.template)
        .with_context(|| format!("Invalid template {}", args.template.display()))?;
    let dataset = template.build_dataset()?;

    println!("{}", dataset.summary().trim_end());
    println!("template variables");
    for (id, var) in &template.variables {
        println!("  {} [{}] {} {}", id, var.variable_type, var.dims, var.name);
    }

    if args.acdd {
        let report = dataset.acdd_report();
        println!("{}", report);
        if !report.is_compliant() {
            std::process::exit(2);
        }
    }

    Ok(())
}
