use impactviz_core::{
    chart::chart_series,
    model::{self, ImpactModel},
    scenario::ScenarioBuilder,
};
use impactviz_schemas::{
    chart::MetricChart,
    impact::Baseline,
    parameters::{ParameterId, SimulationParameters},
};

/// Every combination of slider steps for volume, water reduction, secondary material and price.
fn slider_grid() -> impl Iterator<Item = SimulationParameters> {
    let volumes: Vec<f64> = ParameterId::ProductionVolume.range().values().collect();
    let waters: Vec<f64> = ParameterId::WaterReduction.range().values().collect();
    let materials: Vec<f64> = ParameterId::SecondaryMaterial.range().values().collect();
    let prices: Vec<f64> = ParameterId::SalePrice.range().values().collect();

    volumes.into_iter().flat_map(move |volume| {
        let (waters, materials, prices) = (waters.clone(), materials.clone(), prices.clone());
        waters.into_iter().flat_map(move |water| {
            let (materials, prices) = (materials.clone(), prices.clone());
            materials.into_iter().flat_map(move |material| {
                prices.clone().into_iter().map(move |price| SimulationParameters {
                    production_volume: volume,
                    water_reduction_fraction: water,
                    agrochemicals_avoided: 500.0,
                    secondary_material_fraction: material,
                    sale_price: price,
                })
            })
        })
    })
}

#[test]
fn formulas_hold_across_the_slider_domain() {
    let mut evaluated = 0usize;
    for params in slider_grid() {
        let result = model::evaluate(&params);
        assert_eq!(
            result.water_saved_liters,
            params.production_volume * params.water_reduction_fraction * 10.0
        );
        assert_eq!(
            result.material_valorized_kg,
            params.production_volume * params.secondary_material_fraction
        );
        assert_eq!(
            result.revenue_generated,
            params.production_volume * params.sale_price
        );
        assert_eq!(result.commercial_alliances, 5);
        assert_eq!(result.green_jobs, 4);
        evaluated += 1;
    }
    assert_eq!(evaluated, 16 * 21 * 21 * 21);
}

#[test]
fn agrochemicals_pass_through_every_step() {
    for value in ParameterId::AgrochemicalsAvoided.range().values() {
        let params = ScenarioBuilder::new().with_agrochemicals_avoided(value).build();
        assert_eq!(model::evaluate(&params).agrochemicals_avoided_kg, value);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let model = ImpactModel::new();
    let params = ScenarioBuilder::new()
        .with_production_volume(17_000.0)
        .with_water_reduction(0.22)
        .with_secondary_material(0.78)
        .with_sale_price(3_400.0)
        .build();

    let first = model.evaluate(&params);
    let second = model.evaluate(&params);
    assert_eq!(first, second);
    assert_eq!(model.report(&params), model.report(&params));
}

#[test]
fn projections_never_exceed_chart_tops() {
    for params in slider_grid().step_by(97) {
        let result = model::evaluate(&params);
        for series in chart_series(&result, &Baseline::STANDARD) {
            assert!(series.y_max() >= series.projection * 1.15 - 1e-6);
            assert!(series.y_max() >= series.baseline * 1.15 - 1e-6);
            assert!(series.y_max() >= series.chart.y_floor());
        }
    }
}

#[test]
fn upper_bound_scenario_outgrows_the_revenue_baseline() {
    let params = ScenarioBuilder::new()
        .with_production_volume(20_000.0)
        .with_water_reduction(0.3)
        .with_secondary_material(0.9)
        .with_sale_price(6_000.0)
        .build();
    let result = model::evaluate(&params);
    let [water, material, revenue] = chart_series(&result, &Baseline::STANDARD);

    assert_eq!(water.projection, 60_000.0);
    assert_eq!(material.projection, 18_000.0);
    assert_eq!(revenue.chart, MetricChart::RevenueGenerated);
    assert!(revenue.projection > revenue.baseline);
    assert!(material.projection > material.baseline);
    assert!(water.projection < water.baseline);
}
