use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Product palette.
pub mod palette {
    use super::Rgb;

    pub const DARK_TEAL: Rgb = Rgb(0x0E, 0x45, 0x4A);
    pub const VIBRANT_GREEN: Rgb = Rgb(0x1F, 0xFF, 0x5F);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const LIGHT_BLUE: Rgb = Rgb(0x00, 0x9B, 0xD3);
    pub const MID_BLUE: Rgb = Rgb(0x00, 0x8C, 0xCF);
    pub const DARK_BLUE: Rgb = Rgb(0x00, 0x36, 0x6E);
}

pub const BAR_LABELS: [&str; 2] = ["Línea Base", "Proyección"];

/// The baseline-vs-projection charts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricChart {
    WaterSaved,
    MaterialValorized,
    RevenueGenerated,
}

impl MetricChart {
    pub const ALL: [MetricChart; 3] = [
        MetricChart::WaterSaved,
        MetricChart::MaterialValorized,
        MetricChart::RevenueGenerated,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MetricChart::WaterSaved => "Ahorro de Agua",
            MetricChart::MaterialValorized => "Material Valorizado",
            MetricChart::RevenueGenerated => "Ingresos Generados",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            MetricChart::WaterSaved => "Litros/año",
            MetricChart::MaterialValorized => "kg/año",
            MetricChart::RevenueGenerated => "CLP/año",
        }
    }

    /// Stem of the PNG file a single-chart export is written to.
    pub fn file_stem(self) -> &'static str {
        match self {
            MetricChart::WaterSaved => "Ahorro_Agua",
            MetricChart::MaterialValorized => "Material_Valorizado",
            MetricChart::RevenueGenerated => "Ingresos_Generados",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.png", self.file_stem())
    }

    /// Prefix put in front of the figures drawn above the bars.
    pub fn value_prefix(self) -> &'static str {
        match self {
            MetricChart::RevenueGenerated => "CLP ",
            _ => "",
        }
    }

    /// Smallest top the y-axis is allowed to have.
    pub fn y_floor(self) -> f64 {
        match self {
            MetricChart::RevenueGenerated => 1_000.0,
            _ => 1.0,
        }
    }

    /// Bar colours as (baseline, projection).
    pub fn bar_colors(self) -> (Rgb, Rgb) {
        match self {
            MetricChart::WaterSaved => (palette::DARK_TEAL, palette::VIBRANT_GREEN),
            MetricChart::MaterialValorized => (palette::LIGHT_BLUE, palette::DARK_BLUE),
            MetricChart::RevenueGenerated => (palette::VIBRANT_GREEN, palette::DARK_TEAL),
        }
    }

    pub fn axis_label_color(self) -> Rgb {
        match self {
            MetricChart::MaterialValorized => palette::DARK_TEAL,
            _ => palette::DARK_BLUE,
        }
    }
}
