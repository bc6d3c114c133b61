//! Chart Rendering
//!
//! Area chart of the TVL series drawn with plotters, to an SVG string or a
//! PNG file.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::error::RenderError;
use super::state::DashboardView;
use crate::format::{format_date, format_value};
use crate::series::{Series, SECONDS_PER_DAY};

/// Colours and geometry of the chart
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    /// Axis, grid and label colour
    pub axis: RGBColor,
    pub series: RGBColor,
    pub stroke_width: u32,
    pub title: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 590,
            background: RGBColor(0x27, 0x2D, 0x49),
            axis: RGBColor(0x6F, 0x6C, 0xA4),
            series: RGBColor(0x89, 0x00, 0xB4),
            stroke_width: 3,
            title: "Asset TVL".to_string(),
        }
    }
}

impl ChartStyle {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Round a raw step up to 1, 2, 2.5 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let exponent = raw.log10().floor() as i32;
    let base = 10f64.powi(exponent);
    let fraction = raw / base;

    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * base
}

/// Y-axis bounds: the smallest value, and the largest rounded up to a nice step
pub fn y_domain(series: &Series) -> Option<(f64, f64)> {
    let min = series.min_value()?;
    let max = series.max_value()?;

    let step = if max > min {
        nice_step((max - min) / 4.0)
    } else if min != 0.0 {
        nice_step(min.abs() * 0.1)
    } else {
        1.0
    };

    let upper = (max / step).ceil() * step;
    let upper = if upper <= min { min + step } else { upper };

    Some((min, upper))
}

fn draw_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Render the chart as an SVG document
pub fn render_svg(view: &DashboardView, style: &ChartStyle) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        draw_chart(&root, view, style)?;
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

/// Render the chart to a PNG file
pub fn render_png(view: &DashboardView, style: &ChartStyle, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_chart(&root, view, style)?;
    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &DashboardView,
    style: &ChartStyle,
) -> Result<(), RenderError> {
    root.fill(&style.background).map_err(draw_err)?;

    let series = match view.data.as_ref().filter(|s| !s.is_empty()) {
        Some(series) => series,
        None => return draw_empty(root, view, style),
    };

    let (y_min, y_max) = y_domain(series).unwrap_or((0.0, 1.0));

    // x domain follows the data; a single point gets one day of room
    let x_min = series.start_date;
    let x_max = if series.end_date > x_min {
        series.end_date
    } else {
        x_min + SECONDS_PER_DAY
    };

    let key_points: Vec<i64> = view
        .ticks
        .iter()
        .copied()
        .filter(|t| (x_min..=x_max).contains(t))
        .collect();

    let caption = match &view.info {
        Some(info) => format!("{}: {}", info.farm, info.asset),
        None => style.title.clone(),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 28.0).into_font().color(&WHITE))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((x_min..x_max).with_key_points(key_points), y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .bold_line_style(style.axis.mix(0.6))
        .axis_style(style.axis)
        .label_style(("sans-serif", 14.0).into_font().color(&style.axis))
        .axis_desc_style(("sans-serif", 18.0).into_font().color(&WHITE))
        .x_label_formatter(&|x: &i64| format_date(*x))
        .y_label_formatter(&|y: &f64| format_value(*y))
        .y_desc(style.title.as_str())
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            AreaSeries::new(
                series.chart_values.iter().map(|p| (p.date, p.value)),
                y_min,
                style.series.mix(0.35).filled(),
            )
            .border_style(style.series.stroke_width(style.stroke_width)),
        )
        .map_err(draw_err)?;

    Ok(())
}

/// Grid with no series, shown while loading or after a failed fetch
fn draw_empty<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &DashboardView,
    style: &ChartStyle,
) -> Result<(), RenderError> {
    let caption = if view.loading { "Loading..." } else { "No data" };

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 28.0).into_font().color(&style.axis))
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0i64..SECONDS_PER_DAY, 0f64..1f64)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .bold_line_style(style.axis.mix(0.6))
        .axis_style(style.axis)
        .x_label_formatter(&|_: &i64| String::new())
        .y_label_formatter(&|_: &f64| String::new())
        .draw()
        .map_err(draw_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{AssetInfo, ChartPoint, Period};
    use tempfile::tempdir;

    fn series(values: &[f64]) -> Series {
        let chart_values: Vec<ChartPoint> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(i as i64 * SECONDS_PER_DAY, *v))
            .collect();
        let end_date = chart_values.last().map(|p| p.date).unwrap_or(0);
        Series {
            chart_values,
            start_date: 0,
            end_date,
        }
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(207.5), 250.0);
        assert_eq!(nice_step(5.0), 5.0);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(1500.0), 2000.0);
    }

    #[test]
    fn test_y_domain_starts_at_data_min() {
        assert_eq!(y_domain(&series(&[120.0, 950.0, 400.0])), Some((120.0, 1000.0)));
    }

    #[test]
    fn test_y_domain_flat_series() {
        assert_eq!(y_domain(&series(&[50.0, 50.0])), Some((50.0, 55.0)));
        assert_eq!(y_domain(&series(&[0.0])), Some((0.0, 1.0)));
    }

    #[test]
    fn test_y_domain_empty() {
        assert_eq!(y_domain(&series(&[])), None);
    }

    #[test]
    fn test_default_style() {
        let style = ChartStyle::default().with_size(800, 400);
        assert_eq!((style.width, style.height), (800, 400));
        assert_eq!(style.series, RGBColor(0x89, 0x00, 0xB4));
        assert_eq!(style.title, "Asset TVL");
    }

    fn loaded_view(values: &[f64]) -> DashboardView {
        let data = series(values);
        let ticks = data.ticks(Period::Week);
        DashboardView {
            loading: false,
            info: Some(AssetInfo {
                farm: "Convex".to_string(),
                asset: "ETH_Convex_steth".to_string(),
            }),
            data: Some(data),
            period: Period::Week,
            ticks,
        }
    }

    #[test]
    fn test_render_svg_with_data() {
        let svg = render_svg(
            &loaded_view(&[1_200_000.0, 1_350_000.0, 1_280_000.0]),
            &ChartStyle::default(),
        )
        .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Convex: ETH_Convex_steth"));
    }

    #[test]
    fn test_render_svg_empty_view() {
        let svg = render_svg(&DashboardView::default(), &ChartStyle::default()).unwrap();
        assert!(svg.contains("No data"));
    }

    #[test]
    fn test_render_svg_while_loading() {
        let view = DashboardView {
            loading: true,
            ..Default::default()
        };
        let svg = render_svg(&view, &ChartStyle::default()).unwrap();
        assert!(svg.contains("Loading..."));
    }

    #[test]
    fn test_render_svg_single_point() {
        // One point widens the x domain by a day
        let svg = render_svg(&loaded_view(&[42.0]), &ChartStyle::default()).unwrap();
        assert!(!svg.is_empty());
    }

    #[test]
    fn test_render_png_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("charts").join("tvl.png");

        render_png(&DashboardView::default(), &ChartStyle::default(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);

        render_png(&loaded_view(&[3.0, 5.0]), &ChartStyle::default(), &path).unwrap();
        assert!(path.exists());
    }
}
