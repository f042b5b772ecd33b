use crate::{format, model::ScenarioReport};
use impactviz_schemas::{impact::ImpactResult, parameters::ParameterId};

/// A headline figure shown above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
    pub caption: &'static str,
}

/// Headline cards in page order.
pub fn metric_cards(result: &ImpactResult) -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "Ahorro de Agua",
            value: format!("{} litros/año", format::thousands(result.water_saved_liters)),
            caption: "Ahorro de agua logrado por la aplicación del agente humectante.",
        },
        MetricCard {
            label: "Material Valorizado",
            value: format!("{} kg/año", format::thousands(result.material_valorized_kg)),
            caption: "Cantidad de materias primas secundarias reincorporadas en el proceso.",
        },
        MetricCard {
            label: "Ingresos Generados",
            value: format!("CLP {}", format::thousands(result.revenue_generated)),
            caption: "Ingresos totales por la venta del agente humectante.",
        },
        MetricCard {
            label: "Agroquímicos Evitados",
            value: format!("{} kg/año", format::thousands(result.agrochemicals_avoided_kg)),
            caption: "Reducción en el uso de agroquímicos sintéticos.",
        },
        MetricCard {
            label: "Alianzas Comerciales",
            value: result.commercial_alliances.to_string(),
            caption: "Número de alianzas comerciales colaborativas generadas.",
        },
    ]
}

/// Human-readable value of a parameter, with the unit its slider shows.
pub fn parameter_value(id: ParameterId, value: f64) -> String {
    match id {
        ParameterId::ProductionVolume | ParameterId::AgrochemicalsAvoided => {
            format!("{} kg/año", format::thousands(value))
        }
        ParameterId::WaterReduction | ParameterId::SecondaryMaterial => format::percent(value),
        ParameterId::SalePrice => format!("CLP {}/kg", format::thousands(value)),
    }
}

/// Plain-text report of one evaluated scenario.
pub fn text_report(report: &ScenarioReport) -> String {
    let result = &report.result;
    let baseline = &report.baseline;
    let rule = "----------------------------------------\n";
    let double_rule = "========================================\n";

    let mut out = String::from("--- [Resultados Proyectados Anuales] ---\n");
    out.push_str(double_rule);
    out.push_str("Parámetros de Simulación:\n");
    for id in ParameterId::ALL {
        let value = parameter_value(id, report.parameters.get(id));
        out.push_str(&format!("  - {:<32} {}\n", id.label(), value));
    }
    out.push_str(rule);
    for card in metric_cards(result) {
        out.push_str(&format!("  - {:<24} {}\n", card.label, card.value));
    }
    out.push_str(&format!("  - {:<24} {}\n", "Empleos Verdes", result.green_jobs));
    out.push_str(rule);
    out.push_str("Línea Base vs. Proyección:\n");
    out.push_str(&format!(
        "  - Agua:      {:>15} L   -> {:>15} L\n",
        format::thousands(baseline.water_liters),
        format::thousands(result.water_saved_liters)
    ));
    out.push_str(&format!(
        "  - Material:  {:>15} kg  -> {:>15} kg\n",
        format::thousands(baseline.material_kg),
        format::thousands(result.material_valorized_kg)
    ));
    out.push_str(&format!(
        "  - Ingresos:  {:>15} CLP -> {:>15} CLP\n",
        format::thousands(baseline.revenue),
        format::thousands(result.revenue_generated)
    ));
    out.push_str(double_rule);
    out
}
