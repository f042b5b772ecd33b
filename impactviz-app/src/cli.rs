use clap::{Args, Parser, Subcommand, ValueEnum};
use impactviz_schemas::parameters::ParameterId;
use std::path::PathBuf;

/// Impact visualizer for a 100% natural soil humectant.
#[derive(Debug, Parser)]
#[command(name = "impactviz", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./impactviz.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the impact model and print the projected figures.
    Evaluate {
        #[command(flatten)]
        params: ParameterArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render the baseline-vs-projection charts as PNG files.
    Export {
        #[command(flatten)]
        params: ParameterArgs,
        /// Directory the PNG files are written to.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Also write the three-panel overview figure.
        #[arg(long)]
        overview: bool,
        /// Write into a fresh run_<timestamp> subdirectory.
        #[arg(long)]
        timestamped: bool,
    },
    /// Evaluate the model across every step of one slider and emit a CSV table.
    Sweep {
        /// Parameter to vary (e.g. production_volume, water, secondary, sale_price).
        #[arg(long)]
        parameter: ParameterId,
        #[command(flatten)]
        params: ParameterArgs,
        /// CSV output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fetch the partner logos and report their status.
    Logos {
        /// Save the fetched logos as PNG into this directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Interactive terminal dashboard.
    Dashboard {
        #[command(flatten)]
        params: ParameterArgs,
        /// Do not fetch the partner logos on start-up.
        #[arg(long)]
        skip_logos: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// The clamped parameters as a scenario file.
    Scenario,
}

/// Parameter sources shared by every command that evaluates the model.
#[derive(Debug, Clone, Default, Args)]
pub struct ParameterArgs {
    /// Scenario YAML file.
    #[arg(long)]
    pub scenario: Option<PathBuf>,
    /// Produced volume in kg/year [5000, 20000].
    #[arg(long)]
    pub production_volume: Option<f64>,
    /// Water consumption reduction as a fraction [0.1, 0.3].
    #[arg(long)]
    pub water_reduction: Option<f64>,
    /// Synthetic agrochemicals avoided in kg/year [100, 1000].
    #[arg(long)]
    pub agrochemicals: Option<f64>,
    /// Share of secondary raw materials [0.7, 0.9].
    #[arg(long)]
    pub secondary_material: Option<f64>,
    /// Sale price in CLP/kg [2000, 6000].
    #[arg(long)]
    pub sale_price: Option<f64>,
}

impl ParameterArgs {
    /// Per-field overrides given on the command line.
    pub fn overrides(&self) -> [(ParameterId, Option<f64>); 5] {
        [
            (ParameterId::ProductionVolume, self.production_volume),
            (ParameterId::WaterReduction, self.water_reduction),
            (ParameterId::AgrochemicalsAvoided, self.agrochemicals),
            (ParameterId::SecondaryMaterial, self.secondary_material),
            (ParameterId::SalePrice, self.sale_price),
        ]
    }
}
