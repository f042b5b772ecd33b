use crate::parameters::SimulationParameters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub schema_version: String,
    pub parameters: SimulationParameters,
}
