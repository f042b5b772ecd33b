use crate::cli::{OutputFormat, ParameterArgs};
use crate::config::AppConfig;
use crate::logos::{self, LogoStatus};
use crate::plotting;
use anyhow::{Context, Result};
use impactviz_core::{
    chart::chart_series,
    model::ImpactModel,
    scenario::{self, ScenarioBuilder},
    summary, sweep,
};
use impactviz_schemas::parameters::{ParameterId, SimulationParameters};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Resolves the parameters of a run: slider defaults, then the configuration's
/// initial parameters, then the scenario file, then command-line flags. The
/// result is clamped to the slider ranges.
pub fn resolve_parameters(
    config: &AppConfig,
    args: &ParameterArgs,
) -> Result<SimulationParameters> {
    let mut seed = config.initial_parameters.unwrap_or_default();
    if let Some(path) = &args.scenario {
        seed = scenario::load_scenario_file(path)
            .with_context(|| format!("Failed to load scenario {:?}", path))?;
    }

    let builder = args
        .overrides()
        .into_iter()
        .fold(ScenarioBuilder::from_parameters(seed), |builder, (id, value)| {
            builder.with_optional(id, value)
        });
    Ok(builder.build())
}

/// Evaluates the model and prints the report in the requested format.
pub fn run_evaluate(params: &SimulationParameters, format: OutputFormat) -> Result<()> {
    let report = ImpactModel::new().report(params);
    match format {
        OutputFormat::Text => print!("{}", summary::text_report(&report)),
        OutputFormat::Json => println!("{}", report.to_json_pretty()?),
        OutputFormat::Scenario => print!("{}", scenario::scenario_to_yaml(params)?),
    }
    Ok(())
}

/// Renders the three charts (and optionally the overview) and writes them under `out_dir`.
pub fn run_export(
    params: &SimulationParameters,
    config: &AppConfig,
    out_dir: &Path,
    overview: bool,
) -> Result<Vec<PathBuf>> {
    let model = ImpactModel::new();
    let result = model.evaluate(params);
    let series = chart_series(&result, model.baseline());

    let chart_size = (config.chart.width, config.chart.height);
    let mut exports = plotting::export_charts(&series, chart_size)?;
    if overview {
        let overview_size = (config.chart.overview_width, config.chart.overview_height);
        exports.push(plotting::export_overview(&series, overview_size)?);
    }

    let written = plotting::write_exports(out_dir, &exports)?;
    for path in &written {
        tracing::info!(path = %path.display(), "Chart exported");
    }
    Ok(written)
}

/// Directory for an export run, optionally in a fresh timestamped subdirectory.
pub fn export_dir(base: &Path, timestamped: bool) -> PathBuf {
    if timestamped {
        base.join(format!("run_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S")))
    } else {
        base.to_path_buf()
    }
}

/// Writes the sensitivity table for `parameter` to `out`, or to stdout.
pub fn run_sweep(
    params: &SimulationParameters,
    parameter: ParameterId,
    out: Option<&Path>,
) -> Result<()> {
    let rows = sweep::sweep(&ImpactModel::new(), params, parameter);
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            sweep::write_csv(file, &path.display().to_string(), &rows)?;
            tracing::info!(path = %path.display(), rows = rows.len(), "Sensitivity table written");
        }
        None => sweep::write_csv(io::stdout().lock(), "<stdout>", &rows)?,
    }
    Ok(())
}

/// Fetches the logos, prints one status line per logo and optionally saves them.
pub fn run_logos(config: &AppConfig, out_dir: Option<&Path>) -> Result<Vec<LogoStatus>> {
    let statuses = logos::fetch_logos(&config.logos);
    for status in &statuses {
        let marker = match status {
            LogoStatus::Loaded(_) => "ok",
            LogoStatus::Failed { .. } => "error",
        };
        println!("[{}] {}", marker, status.summary());
    }
    if let Some(dir) = out_dir {
        for path in logos::save_logos(dir, &statuses)? {
            println!("Saved {}", path.display());
        }
    }
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_scenario_which_overrides_config() {
        let mut scenario = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            scenario,
            "schema_version: \"1\"\nparameters:\n  production_volume: 15000.0\n  sale_price: 3000.0"
        )
        .unwrap();

        let config = AppConfig {
            initial_parameters: Some(SimulationParameters {
                agrochemicals_avoided: 900.0,
                production_volume: 6_000.0,
                ..SimulationParameters::default()
            }),
            ..AppConfig::default()
        };
        let args = ParameterArgs {
            scenario: Some(scenario.path().to_path_buf()),
            sale_price: Some(5_000.0),
            ..ParameterArgs::default()
        };

        let params = resolve_parameters(&config, &args).unwrap();
        assert_eq!(params.production_volume, 15_000.0);
        assert_eq!(params.sale_price, 5_000.0);
        // The scenario file replaces the configured seed; unset fields fall back to defaults.
        assert_eq!(params.agrochemicals_avoided, 500.0);
    }

    #[test]
    fn config_seed_applies_without_scenario() {
        let config = AppConfig {
            initial_parameters: Some(SimulationParameters {
                agrochemicals_avoided: 900.0,
                ..SimulationParameters::default()
            }),
            ..AppConfig::default()
        };
        let params = resolve_parameters(&config, &ParameterArgs::default()).unwrap();
        assert_eq!(params.agrochemicals_avoided, 900.0);
    }

    #[test]
    fn out_of_range_flags_are_clamped() {
        let args = ParameterArgs {
            production_volume: Some(50_000.0),
            water_reduction: Some(0.01),
            ..ParameterArgs::default()
        };
        let params = resolve_parameters(&AppConfig::default(), &args).unwrap();
        assert_eq!(params.production_volume, 20_000.0);
        assert_eq!(params.water_reduction_fraction, 0.1);
    }

    #[test]
    fn sweep_writes_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tables").join("price.csv");
        run_sweep(
            &SimulationParameters::default(),
            ParameterId::SalePrice,
            Some(&out),
        )
        .unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 22);
        assert!(text.lines().nth(1).unwrap().starts_with("sale_price,2000"));
    }

    #[test]
    fn plain_export_dir_is_unchanged() {
        let base = Path::new("/tmp/exports");
        assert_eq!(export_dir(base, false), base);
        let stamped = export_dir(base, true);
        assert!(stamped.starts_with(base));
        assert!(stamped
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.starts_with("run_")));
    }
}
