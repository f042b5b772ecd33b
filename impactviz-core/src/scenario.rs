use crate::error::ImpactError;
use impactviz_schemas::{
    file_formats::ScenarioFile,
    parameters::{ParameterId, SimulationParameters},
};
use std::{fs, path::Path};

pub const SCENARIO_SCHEMA_VERSION: &str = "1";

/// A fluent builder for a clamped set of `SimulationParameters`.
///
/// Every setter records the raw value; `build` clamps each field to its slider
/// range and snaps it to the slider step, so whatever the input layer hands in
/// ends up as a value the sliders could have produced.
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    params: SimulationParameters,
}

impl ScenarioBuilder {
    /// Creates a builder seeded with the slider defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with `params`.
    pub fn from_parameters(params: SimulationParameters) -> Self {
        Self { params }
    }

    pub fn with_production_volume(self, kg_per_year: f64) -> Self {
        self.with(ParameterId::ProductionVolume, kg_per_year)
    }

    pub fn with_water_reduction(self, fraction: f64) -> Self {
        self.with(ParameterId::WaterReduction, fraction)
    }

    pub fn with_agrochemicals_avoided(self, kg_per_year: f64) -> Self {
        self.with(ParameterId::AgrochemicalsAvoided, kg_per_year)
    }

    pub fn with_secondary_material(self, fraction: f64) -> Self {
        self.with(ParameterId::SecondaryMaterial, fraction)
    }

    pub fn with_sale_price(self, price_per_kg: f64) -> Self {
        self.with(ParameterId::SalePrice, price_per_kg)
    }

    pub fn with(mut self, id: ParameterId, value: f64) -> Self {
        self.params.set(id, value);
        self
    }

    /// Applies `value` only when present.
    pub fn with_optional(self, id: ParameterId, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.with(id, value),
            None => self,
        }
    }

    /// Consumes the builder and returns the clamped parameters.
    pub fn build(self) -> SimulationParameters {
        let clamped = self.params.clamped();
        for id in ParameterId::ALL {
            let (raw, kept) = (self.params.get(id), clamped.get(id));
            if raw != kept {
                tracing::debug!(
                    parameter = %id,
                    raw,
                    clamped = kept,
                    "Clamped parameter to slider range"
                );
            }
        }
        clamped
    }
}

/// Loads a scenario YAML file. Missing parameter fields take their slider defaults.
pub fn load_scenario_file(path: &Path) -> Result<SimulationParameters, ImpactError> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| ImpactError::FileIO(display.clone(), e))?;
    let file: ScenarioFile =
        serde_yaml::from_str(&content).map_err(|e| ImpactError::YamlParsing(display, e))?;
    if file.schema_version != SCENARIO_SCHEMA_VERSION {
        return Err(ImpactError::UnsupportedSchema(file.schema_version));
    }
    Ok(file.parameters)
}

/// Serializes `params` as a scenario YAML document.
pub fn scenario_to_yaml(params: &SimulationParameters) -> Result<String, ImpactError> {
    let file = ScenarioFile {
        schema_version: SCENARIO_SCHEMA_VERSION.to_string(),
        parameters: *params,
    };
    serde_yaml::to_string(&file).map_err(ImpactError::YamlSerialization)
}
