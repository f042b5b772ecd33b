//! The impact model: a pure mapping from simulation parameters to annual impact figures.

use crate::error::ImpactError;
use impactviz_schemas::{
    impact::{Baseline, ImpactResult},
    parameters::SimulationParameters,
};
use serde::Serialize;

/// Litres of water saved per kilogram of product for each unit of reduction fraction.
pub const WATER_LITERS_PER_KG: f64 = 10.0;

/// Collaborative commercial alliances the project commits to.
pub const COMMERCIAL_ALLIANCES: u32 = 5;

/// Green jobs the project commits to.
pub const GREEN_JOBS: u32 = 4;

/// Evaluates the model against the standard baseline.
pub fn evaluate(params: &SimulationParameters) -> ImpactResult {
    ImpactResult {
        water_saved_liters: params.production_volume
            * params.water_reduction_fraction
            * WATER_LITERS_PER_KG,
        material_valorized_kg: params.production_volume * params.secondary_material_fraction,
        revenue_generated: params.production_volume * params.sale_price,
        agrochemicals_avoided_kg: params.agrochemicals_avoided,
        commercial_alliances: COMMERCIAL_ALLIANCES,
        green_jobs: GREEN_JOBS,
    }
}

/// The model together with the baseline its projections are compared against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactModel {
    baseline: Baseline,
}

impl ImpactModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn evaluate(&self, params: &SimulationParameters) -> ImpactResult {
        let result = evaluate(params);
        tracing::debug!(?params, ?result, "Evaluated impact model");
        result
    }

    /// Evaluates `params` and bundles inputs, baseline and result for reporting.
    pub fn report(&self, params: &SimulationParameters) -> ScenarioReport {
        ScenarioReport {
            parameters: *params,
            baseline: self.baseline,
            result: self.evaluate(params),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub parameters: SimulationParameters,
    pub baseline: Baseline,
    pub result: ImpactResult,
}

impl ScenarioReport {
    pub fn to_json_pretty(&self) -> Result<String, ImpactError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
