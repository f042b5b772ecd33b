//! Sensitivity tables: the model evaluated at every step of one slider.

use crate::{error::ImpactError, model::ImpactModel};
use csv::Writer;
use impactviz_schemas::parameters::{ParameterId, SimulationParameters};
use serde::Serialize;
use std::io;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub parameter: &'static str,
    pub value: f64,
    pub water_saved_liters: f64,
    pub material_valorized_kg: f64,
    pub revenue_generated: f64,
    pub agrochemicals_avoided_kg: f64,
    pub commercial_alliances: u32,
    pub green_jobs: u32,
}

/// Evaluates `model` at every step of `varied`, holding the other parameters of `base` fixed.
pub fn sweep(
    model: &ImpactModel,
    base: &SimulationParameters,
    varied: ParameterId,
) -> Vec<SweepRow> {
    varied
        .range()
        .values()
        .map(|value| {
            let mut params = *base;
            params.set(varied, value);
            let result = model.evaluate(&params);
            SweepRow {
                parameter: varied.key(),
                value,
                water_saved_liters: result.water_saved_liters,
                material_valorized_kg: result.material_valorized_kg,
                revenue_generated: result.revenue_generated,
                agrochemicals_avoided_kg: result.agrochemicals_avoided_kg,
                commercial_alliances: result.commercial_alliances,
                green_jobs: result.green_jobs,
            }
        })
        .collect()
}

/// Writes `rows` as CSV with a header line. `destination` only names the target in errors.
pub fn write_csv<W: io::Write>(
    sink: W,
    destination: &str,
    rows: &[SweepRow],
) -> Result<(), ImpactError> {
    let mut writer = Writer::from_writer(sink);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ImpactError::CsvError(destination.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| ImpactError::FileIO(destination.to_string(), e))?;
    Ok(())
}
