//! This module renders the baseline-vs-projection bar charts and encodes them as PNG.

use anyhow::{Context, Result};
use impactviz_core::{chart::ChartSeries, format};
use impactviz_schemas::chart::{palette, MetricChart, Rgb, BAR_LABELS};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::{fs, path::Path, path::PathBuf};

/// File name of the three-panel figure.
pub const OVERVIEW_FILE: &str = "Analisis_Impactos.png";

/// Gap on each side of a bar, as a fraction of its slot.
const BAR_SIDE_MARGIN: f64 = 0.2;

/// A rendered chart, ready to be offered for download or written to disk.
#[derive(Debug, Clone)]
pub struct ChartExport {
    pub file_name: String,
    pub png: Vec<u8>,
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// Renders one chart per series, each under its fixed file name.
pub fn export_charts(series: &[ChartSeries], size: (u32, u32)) -> Result<Vec<ChartExport>> {
    series
        .iter()
        .map(|s| {
            Ok(ChartExport {
                file_name: s.chart.file_name(),
                png: render_chart_png(s, size)
                    .with_context(|| format!("Failed to render chart '{}'", s.chart.title()))?,
            })
        })
        .collect()
}

/// Renders every series side by side in a single figure.
pub fn export_overview(series: &[ChartSeries], size: (u32, u32)) -> Result<ChartExport> {
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        root.fill(&color(palette::WHITE))?;
        let panels = root.split_evenly((1, series.len().max(1)));
        for (panel, s) in panels.iter().zip(series) {
            draw_bar_chart(panel, s)?;
        }
        root.present()?;
    }
    Ok(ChartExport {
        file_name: OVERVIEW_FILE.to_string(),
        png: encode_png(buffer, size)?,
    })
}

/// Renders a single chart into an in-memory PNG.
pub fn render_chart_png(series: &ChartSeries, size: (u32, u32)) -> Result<Vec<u8>> {
    let (width, height) = size;
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        root.fill(&color(palette::WHITE))?;
        draw_bar_chart(&root, series)?;
        root.present()?;
    }
    encode_png(buffer, size)
}

/// Writes each export into `dir`, creating it when needed.
pub fn write_exports(dir: &Path, exports: &[ChartExport]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    exports
        .iter()
        .map(|export| {
            let path = dir.join(&export.file_name);
            fs::write(&path, &export.png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(path)
        })
        .collect()
}

pub(crate) fn encode_png(rgb: Vec<u8>, (width, height): (u32, u32)) -> Result<Vec<u8>> {
    let image = image::RgbImage::from_raw(width, height, rgb)
        .context("Pixel buffer does not match the figure size")?;
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image).write_to(&mut bytes, image::ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Draws two bars (baseline, projection) with their figures on top.
fn draw_bar_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    series: &ChartSeries,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (_, height) = area.dim_in_pixel();
    // Type sizes follow the figure height so exports at any size keep their proportions.
    let scale = height as f64 / 600.0;
    let px = |size: f64| (size * scale).round().max(1.0) as u32;
    let pt = |size: f64| (size * scale).round().max(1.0);

    let chart_kind: MetricChart = series.chart;
    let (baseline_color, projection_color) = chart_kind.bar_colors();
    let title_color = color(palette::DARK_BLUE);
    let tick_color = color(palette::DARK_TEAL);
    // Segmented ranges include their end, so 0..=last_bar yields one slot per bar.
    let last_bar = BAR_LABELS.len() as u32 - 1;

    let mut chart = ChartBuilder::on(area)
        .caption(
            chart_kind.title(),
            ("sans-serif", pt(28.0)).into_font().color(&title_color),
        )
        .margin(px(20.0))
        .x_label_area_size(px(40.0))
        .y_label_area_size(px(110.0))
        .build_cartesian_2d((0u32..last_bar).into_segmented(), 0f64..series.y_max())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(2)
        .y_desc(chart_kind.y_label())
        .axis_desc_style(
            ("sans-serif", pt(22.0))
                .into_font()
                .color(&color(chart_kind.axis_label_color())),
        )
        .label_style(("sans-serif", pt(16.0)).into_font().color(&tick_color))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => BAR_LABELS
                .get(*index as usize)
                .map(|label| label.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|value| format::thousands(*value))
        .draw()?;

    // Bars cover 60% of their slot; the margin applies on both sides.
    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let slot_width = plot_width as f64 / BAR_LABELS.len() as f64;
    let bar_margin = (slot_width * BAR_SIDE_MARGIN).round() as u32;

    for (index, ((_, value), bar_color)) in series
        .bars()
        .into_iter()
        .zip([baseline_color, projection_color])
        .enumerate()
    {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color(bar_color).filled())
                .margin(bar_margin)
                .data(std::iter::once((index as u32, value))),
        )?;
    }

    let label_style = TextStyle::from(
        ("sans-serif", pt(14.0))
            .into_font()
            .style(FontStyle::Bold),
    )
    .color(&tick_color)
    .pos(Pos::new(HPos::Center, VPos::Bottom));

    chart.draw_series(series.bars().into_iter().enumerate().map(|(index, (_, value))| {
        Text::new(
            series.value_label(value),
            (
                SegmentValue::CenterOf(index as u32),
                ChartSeries::label_height(value),
            ),
            label_style.clone(),
        )
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use impactviz_core::{chart::chart_series, model::ImpactModel};
    use impactviz_schemas::parameters::SimulationParameters;

    fn default_series() -> [ChartSeries; 3] {
        let model = ImpactModel::new();
        let result = model.evaluate(&SimulationParameters::default());
        chart_series(&result, model.baseline())
    }

    /// First and last column of `row` painted exactly in `rgb`, right of the y-axis labels.
    fn bar_span(image: &image::RgbImage, row: u32, rgb: Rgb) -> Option<(u32, u32)> {
        let hits: Vec<u32> = (image.width() / 5..image.width())
            .filter(|&x| image.get_pixel(x, row).0 == [rgb.0, rgb.1, rgb.2])
            .collect();
        Some((*hits.first()?, *hits.last()?))
    }

    #[test]
    fn bars_fill_one_slot_each() {
        let (width, height) = (800, 600);
        // Just above the x axis: every bar, even the short water projection, crosses it.
        let row = height - 70;

        for series in default_series() {
            let png = render_chart_png(&series, (width, height)).unwrap();
            let image = image::load_from_memory(&png).unwrap().to_rgb8();
            assert_eq!(image.dimensions(), (width, height));

            let (baseline_rgb, projection_rgb) = series.chart.bar_colors();
            let (b0, b1) = bar_span(&image, row, baseline_rgb)
                .unwrap_or_else(|| panic!("{}: baseline bar missing", series.chart.title()));
            let (p0, p1) = bar_span(&image, row, projection_rgb)
                .unwrap_or_else(|| panic!("{}: projection bar missing", series.chart.title()));

            let baseline_center = (b0 + b1) / 2;
            let projection_center = (p0 + p1) / 2;
            assert!(b1 < p0, "{}: bars overlap", series.chart.title());
            assert!(baseline_center < width / 2);
            assert!(projection_center > width / 2);
            assert!(p1 < width - 10);

            // Two slots share the plot, so the centres sit one slot apart.
            let slot = (projection_center - baseline_center) as f64;
            assert!(slot > width as f64 * 0.35, "slot of {} px", slot);
            for bar in [b1 - b0 + 1, p1 - p0 + 1] {
                let share = bar as f64 / slot;
                assert!((0.5..0.7).contains(&share), "bar covers {:.2} of its slot", share);
            }
        }
    }

    #[test]
    fn exported_charts_decode_at_configured_size() {
        let exports = export_charts(&default_series(), (400, 300)).unwrap();
        let names: Vec<&str> = exports.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(
            names,
            ["Ahorro_Agua.png", "Material_Valorizado.png", "Ingresos_Generados.png"]
        );
        for export in &exports {
            let decoded = image::load_from_memory(&export.png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (400, 300));
        }
    }

    #[test]
    fn overview_holds_every_chart() {
        let export = export_overview(&default_series(), (1200, 420)).unwrap();
        assert_eq!(export.file_name, OVERVIEW_FILE);

        let image = image::load_from_memory(&export.png).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (1200, 420));
        for chart in MetricChart::ALL {
            let (baseline_rgb, _) = chart.bar_colors();
            assert!(
                image.pixels().any(|p| p.0 == [baseline_rgb.0, baseline_rgb.1, baseline_rgb.2]),
                "{} missing from overview",
                chart.title()
            );
        }
    }

    #[test]
    fn encodes_pixel_buffers_as_png() {
        let png = encode_png(vec![255u8; 4 * 3 * 3], (4, 3)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }

    #[test]
    fn rejects_mismatched_buffers() {
        assert!(encode_png(vec![0u8; 10], (4, 3)).is_err());
    }

    #[test]
    fn exports_land_under_their_fixed_names() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let exports: Vec<ChartExport> = MetricChart::ALL
            .iter()
            .map(|chart| ChartExport {
                file_name: chart.file_name(),
                png: encode_png(vec![0u8; 3], (1, 1)).unwrap(),
            })
            .collect();

        let paths = write_exports(&target, &exports).unwrap();
        let names: Vec<String> = paths
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(
            names,
            ["Ahorro_Agua.png", "Material_Valorizado.png", "Ingresos_Generados.png"]
        );
        assert!(paths.iter().all(|p| p.is_file()));
    }
}
