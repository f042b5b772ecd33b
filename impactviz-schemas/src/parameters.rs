use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slider domain of a single simulation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    /// Number of decimals a step-aligned value carries.
    pub decimals: u32,
}

impl ParameterRange {
    /// Clamps `value` into `[min, max]` and snaps it to the nearest step counted from `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        let bounded = value.clamp(self.min, self.max);
        let steps = ((bounded - self.min) / self.step).round();
        let scale = 10f64.powi(self.decimals as i32);
        let snapped = ((self.min + steps * self.step) * scale).round() / scale;
        snapped.clamp(self.min, self.max)
    }

    /// Moves `value` by `steps` slider steps, staying inside the range.
    pub fn nudge(&self, value: f64, steps: i32) -> f64 {
        self.clamp(self.clamp(value) + steps as f64 * self.step)
    }

    /// Number of distinct step-aligned values in the range, bounds included.
    pub fn step_count(&self) -> usize {
        ((self.max - self.min) / self.step).round() as usize + 1
    }

    /// Every step-aligned value from `min` to `max`.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.step_count()).map(move |i| self.clamp(self.min + i as f64 * self.step))
    }

    /// Position of `value` inside the range as a ratio in `[0, 1]`.
    pub fn ratio(&self, value: f64) -> f64 {
        ((self.clamp(value) - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// The five user-adjustable inputs, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterId {
    ProductionVolume,
    WaterReduction,
    AgrochemicalsAvoided,
    SecondaryMaterial,
    SalePrice,
}

impl ParameterId {
    pub const ALL: [ParameterId; 5] = [
        ParameterId::ProductionVolume,
        ParameterId::WaterReduction,
        ParameterId::AgrochemicalsAvoided,
        ParameterId::SecondaryMaterial,
        ParameterId::SalePrice,
    ];

    pub fn range(self) -> ParameterRange {
        match self {
            ParameterId::ProductionVolume => ParameterRange {
                min: 5_000.0,
                max: 20_000.0,
                step: 1_000.0,
                default: 10_000.0,
                decimals: 0,
            },
            ParameterId::WaterReduction => ParameterRange {
                min: 0.1,
                max: 0.3,
                step: 0.01,
                default: 0.3,
                decimals: 2,
            },
            ParameterId::AgrochemicalsAvoided => ParameterRange {
                min: 100.0,
                max: 1_000.0,
                step: 50.0,
                default: 500.0,
                decimals: 0,
            },
            ParameterId::SecondaryMaterial => ParameterRange {
                min: 0.7,
                max: 0.9,
                step: 0.01,
                default: 0.85,
                decimals: 2,
            },
            ParameterId::SalePrice => ParameterRange {
                min: 2_000.0,
                max: 6_000.0,
                step: 200.0,
                default: 4_000.0,
                decimals: 0,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterId::ProductionVolume => "Volumen producido (kg/año)",
            ParameterId::WaterReduction => "Reducción consumo agua (%)",
            ParameterId::AgrochemicalsAvoided => "Agroquímicos evitados (kg/año)",
            ParameterId::SecondaryMaterial => "% materias primas secundarias",
            ParameterId::SalePrice => "Precio de venta (CLP/kg)",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            ParameterId::ProductionVolume => {
                "Volumen anual de producto (agente humectante) en kilogramos."
            }
            ParameterId::WaterReduction => {
                "Porcentaje de reducción en el consumo de agua por hectárea tratada."
            }
            ParameterId::AgrochemicalsAvoided => {
                "Cantidad de agroquímicos sintéticos evitados anualmente."
            }
            ParameterId::SecondaryMaterial => {
                "Porcentaje de materias primas secundarias utilizadas en la formulación \
                 del producto."
            }
            ParameterId::SalePrice => "Precio de venta por kilogramo del agente humectante.",
        }
    }

    /// Machine name used on the command line and in CSV headers.
    pub fn key(self) -> &'static str {
        match self {
            ParameterId::ProductionVolume => "production_volume",
            ParameterId::WaterReduction => "water_reduction_fraction",
            ParameterId::AgrochemicalsAvoided => "agrochemicals_avoided",
            ParameterId::SecondaryMaterial => "secondary_material_fraction",
            ParameterId::SalePrice => "sale_price",
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParameterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ParameterId::ALL
            .into_iter()
            .find(|id| {
                id.key() == normalized
                    || id.key().split('_').next() == Some(normalized.as_str())
            })
            .ok_or_else(|| format!("unknown parameter '{}'", s))
    }
}

/// One complete set of simulation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub production_volume: f64,
    pub water_reduction_fraction: f64,
    pub agrochemicals_avoided: f64,
    pub secondary_material_fraction: f64,
    pub sale_price: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            production_volume: ParameterId::ProductionVolume.range().default,
            water_reduction_fraction: ParameterId::WaterReduction.range().default,
            agrochemicals_avoided: ParameterId::AgrochemicalsAvoided.range().default,
            secondary_material_fraction: ParameterId::SecondaryMaterial.range().default,
            sale_price: ParameterId::SalePrice.range().default,
        }
    }
}

impl SimulationParameters {
    pub fn get(&self, id: ParameterId) -> f64 {
        match id {
            ParameterId::ProductionVolume => self.production_volume,
            ParameterId::WaterReduction => self.water_reduction_fraction,
            ParameterId::AgrochemicalsAvoided => self.agrochemicals_avoided,
            ParameterId::SecondaryMaterial => self.secondary_material_fraction,
            ParameterId::SalePrice => self.sale_price,
        }
    }

    pub fn set(&mut self, id: ParameterId, value: f64) {
        let field = match id {
            ParameterId::ProductionVolume => &mut self.production_volume,
            ParameterId::WaterReduction => &mut self.water_reduction_fraction,
            ParameterId::AgrochemicalsAvoided => &mut self.agrochemicals_avoided,
            ParameterId::SecondaryMaterial => &mut self.secondary_material_fraction,
            ParameterId::SalePrice => &mut self.sale_price,
        };
        *field = value;
    }

    /// Returns a copy with every field clamped to its slider range.
    pub fn clamped(&self) -> Self {
        let mut clamped = *self;
        for id in ParameterId::ALL {
            clamped.set(id, id.range().clamp(self.get(id)));
        }
        clamped
    }
}
