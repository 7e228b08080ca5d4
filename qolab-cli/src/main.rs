use anyhow::Result;
use clap::Parser;
use qolab_cli::cli::{Cli, Commands};
use qolab_cli::{EnvConfig, RunOptions, render_summary_markdown, run_experiment};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = qolab_telemetry::init_telemetry("qolab") {
        eprintln!("warning: logging disabled: {e}");
    }

    match cli.command {
        Commands::Run(args) => {
            println!("Running experiment...");
            let options = RunOptions::from(args);
            let results_path = run_experiment(&options, &EnvConfig::from_env()).await?;
            println!("Saved results: {}", results_path.display());
            let summary_path = render_summary_markdown(&results_path, None)?;
            println!("Saved summary: {}", summary_path.display());
        }
        Commands::Report { run } => {
            println!("Generating report...");
            let summary_path = render_summary_markdown(&run, None)?;
            println!("Saved summary: {}", summary_path.display());
        }
    }
    Ok(())
}
