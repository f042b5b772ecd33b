use serde::{Deserialize, Serialize};

/// Reference values the projections are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub water_liters: f64,
    pub material_kg: f64,
    pub revenue: f64,
}

impl Baseline {
    /// Baseline of the project sheet: 450,000 L/year of water, 12,750 kg/year of
    /// secondary material (85% of 15,000 kg) and CLP 45,000,000/year of revenue.
    pub const STANDARD: Baseline = Baseline {
        water_liters: 450_000.0,
        material_kg: 12_750.0,
        revenue: 45_000_000.0,
    };
}

impl Default for Baseline {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Annual impact figures derived from one set of simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub water_saved_liters: f64,
    pub material_valorized_kg: f64,
    pub revenue_generated: f64,
    pub agrochemicals_avoided_kg: f64,
    pub commercial_alliances: u32,
    pub green_jobs: u32,
}
