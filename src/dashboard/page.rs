//! Dashboard Page
//!
//! Server-rendered HTML: header, period selector, loading indicator and the
//! inline SVG chart.

use super::state::DashboardView;
use crate::series::Period;

const PAGE_STYLE: &str = r#"
body { margin: 0; background: #1b2036; font-family: sans-serif; }
.container { display: flex; flex-direction: column; width: 1080px; align-items: center; margin: 96px auto 0; background: #272D49; position: relative; }
.header { width: 100%; font-size: 36px; color: #FFFFFF; margin-bottom: 24px; min-height: 42px; }
.header span { color: #627EFF; font-weight: 700; }
.periods { display: flex; gap: 4px; align-self: flex-end; margin-right: 30px; }
.period { padding: 6px 14px; border: 1px solid #6F6CA4; border-radius: 4px; color: #6F6CA4; text-decoration: none; font-weight: 700; }
.period.active { background: #6F6CA4; color: #FFFFFF; }
.spinner { position: absolute; top: 50%; left: 50%; width: 80px; height: 80px; margin: -40px 0 0 -40px; border: 6px solid #6F6CA4; border-top-color: transparent; border-radius: 50%; animation: spin 1s linear infinite; }
.placeholder { width: 1080px; height: 590px; display: flex; align-items: center; justify-content: center; color: #6F6CA4; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_header(view: &DashboardView) -> String {
    match &view.info {
        Some(info) if !info.farm.is_empty() => format!(
            "<span>{}</span>: {}",
            escape_html(&info.farm),
            escape_html(&info.asset)
        ),
        _ => String::new(),
    }
}

fn render_periods(selected: Period) -> String {
    Period::all()
        .iter()
        .map(|period| {
            let class = if *period == selected {
                "period active"
            } else {
                "period"
            };
            format!(
                r#"<a class="{}" href="/?period={}">{}</a>"#,
                class,
                period.days(),
                period
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Render the full page
///
/// `chart_svg` is `None` when the chart could not be drawn; a placeholder
/// of the same size takes its place.
pub fn render_page(view: &DashboardView, chart_svg: Option<&str>) -> String {
    // Poll until the initial fetch settles
    let refresh = if view.loading {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    let spinner = if view.loading {
        r#"<div class="spinner" role="status" aria-label="Loading"></div>"#
    } else {
        ""
    };

    let chart = match chart_svg {
        Some(svg) => svg.to_string(),
        None => r#"<div class="placeholder">Chart unavailable</div>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
{refresh}
<title>Asset TVL</title>
<style>{style}</style>
</head>
<body>
<section class="container">
<div class="header">{header}</div>
<nav class="periods">{periods}</nav>
{spinner}
<div class="chart">{chart}</div>
</section>
</body>
</html>
"#,
        refresh = refresh,
        style = PAGE_STYLE,
        header = render_header(view),
        periods = render_periods(view.period),
        spinner = spinner,
        chart = chart,
    )
}
