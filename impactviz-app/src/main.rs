use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;

mod cli;
mod config;
mod dashboard;
mod logging;
mod logos;
mod plotting;
mod workflow;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // The dashboard owns the terminal, so its log lines go to a file in the
    // configured output directory. Nothing is logged before this point.
    let _log_guard = match &cli.command {
        Command::Dashboard { .. } => Some(logging::init_file(&config.output_dir)?),
        _ => {
            logging::init_stderr();
            None
        }
    };
    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::debug!("No configuration file found, using defaults"),
    }

    match cli.command {
        Command::Evaluate { params, format } => {
            let params = workflow::resolve_parameters(&config, &params)?;
            workflow::run_evaluate(&params, format)?;
        }
        Command::Export {
            params,
            out_dir,
            overview,
            timestamped,
        } => {
            let params = workflow::resolve_parameters(&config, &params)?;
            let base = out_dir.unwrap_or_else(|| config.output_dir.clone());
            let dir = workflow::export_dir(&base, timestamped);
            for path in workflow::run_export(&params, &config, &dir, overview)? {
                println!("Descargado {}", path.display());
            }
        }
        Command::Sweep {
            parameter,
            params,
            out,
        } => {
            let params = workflow::resolve_parameters(&config, &params)?;
            workflow::run_sweep(&params, parameter, out.as_deref())?;
        }
        Command::Logos { out_dir } => {
            workflow::run_logos(&config, out_dir.as_deref())?;
        }
        Command::Dashboard { params, skip_logos } => {
            let params = workflow::resolve_parameters(&config, &params)?;
            let logos = if skip_logos {
                Vec::new()
            } else {
                logos::fetch_logos(&config.logos)
            };
            tracing::info!(?params, "Starting dashboard");
            dashboard::run(dashboard::Dashboard::new(params, config, logos))?;
        }
    }

    Ok(())
}
