//! Chart-ready data derived from an impact result.

use crate::format;
use impactviz_schemas::{
    chart::{MetricChart, BAR_LABELS},
    impact::{Baseline, ImpactResult},
};

/// Headroom kept above the tallest bar.
pub const Y_HEADROOM: f64 = 1.15;

/// Vertical offset of a value label, relative to the bar height.
pub const LABEL_OFFSET: f64 = 0.05;

/// One baseline-vs-projection bar pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSeries {
    pub chart: MetricChart,
    pub baseline: f64,
    pub projection: f64,
}

impl ChartSeries {
    pub fn new(chart: MetricChart, result: &ImpactResult, baseline: &Baseline) -> Self {
        let (baseline, projection) = match chart {
            MetricChart::WaterSaved => (baseline.water_liters, result.water_saved_liters),
            MetricChart::MaterialValorized => (baseline.material_kg, result.material_valorized_kg),
            MetricChart::RevenueGenerated => (baseline.revenue, result.revenue_generated),
        };
        Self {
            chart,
            baseline,
            projection,
        }
    }

    /// Bars in drawing order, each with its category label.
    pub fn bars(&self) -> [(&'static str, f64); 2] {
        [
            (BAR_LABELS[0], self.baseline),
            (BAR_LABELS[1], self.projection),
        ]
    }

    pub fn y_max(&self) -> f64 {
        (self.baseline.max(self.projection) * Y_HEADROOM).max(self.chart.y_floor())
    }

    /// Text drawn above a bar of height `value`.
    pub fn value_label(&self, value: f64) -> String {
        format!("{}{}", self.chart.value_prefix(), format::thousands(value))
    }

    pub fn label_height(value: f64) -> f64 {
        value + LABEL_OFFSET * value
    }
}

/// Series for every dashboard chart, in display order.
pub fn chart_series(result: &ImpactResult, baseline: &Baseline) -> [ChartSeries; 3] {
    MetricChart::ALL.map(|chart| ChartSeries::new(chart, result, baseline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model;
    use impactviz_schemas::parameters::SimulationParameters;

    #[test]
    fn series_pair_baseline_with_projection() {
        let result = model::evaluate(&SimulationParameters::default());
        let [water, material, revenue] = chart_series(&result, &Baseline::STANDARD);

        assert_eq!((water.baseline, water.projection), (450_000.0, 30_000.0));
        assert_eq!((material.baseline, material.projection), (12_750.0, 8_500.0));
        assert_eq!(
            (revenue.baseline, revenue.projection),
            (45_000_000.0, 40_000_000.0)
        );
        assert_eq!(water.bars()[1], ("Proyección", 30_000.0));
    }

    #[test]
    fn y_axis_keeps_headroom_above_tallest_bar() {
        let result = model::evaluate(&SimulationParameters {
            production_volume: 20_000.0,
            secondary_material_fraction: 0.9,
            ..SimulationParameters::default()
        });
        let [water, material, _] = chart_series(&result, &Baseline::STANDARD);
        assert!((water.y_max() - 450_000.0 * 1.15).abs() < 1e-6);
        assert!((material.y_max() - 18_000.0 * 1.15).abs() < 1e-6);
    }

    #[test]
    fn y_axis_respects_floor() {
        let empty = ChartSeries {
            chart: MetricChart::RevenueGenerated,
            baseline: 0.0,
            projection: 0.0,
        };
        assert_eq!(empty.y_max(), 1_000.0);
        let empty_water = ChartSeries {
            chart: MetricChart::WaterSaved,
            ..empty
        };
        assert_eq!(empty_water.y_max(), 1.0);
    }

    #[test]
    fn revenue_labels_carry_currency() {
        let result = model::evaluate(&SimulationParameters::default());
        let [water, _, revenue] = chart_series(&result, &Baseline::STANDARD);
        assert_eq!(water.value_label(30_000.0), "30,000");
        assert_eq!(revenue.value_label(40_000_000.0), "CLP 40,000,000");
        assert!((ChartSeries::label_height(100.0) - 105.0).abs() < 1e-9);
    }
}
