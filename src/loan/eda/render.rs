//! HTML rendering of the dashboard page.
//!
//! Each chart becomes a plotly bar figure; the page stacks the figures
//! vertically with their captions underneath.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use plotly::common::{Marker, Title};
use plotly::layout::{Axis, Layout};
use plotly::{Bar, Plot};

use crate::loan::eda::charts::{Chart, ChartData};

pub const PAGE_HEADING: &str = "Análisis exploratorio y descriptivo (EDA)";
pub const PAGE_SUBTITLE: &str = "Visualización de la base de datos de la información crediticia.";

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";
const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Montserrat:ital,wght@0,100..900;1,100..900&display=swap";

const PAGE_STYLE: &str = "
    body { font-family: 'Montserrat', serif; color: #373A40; }
    h1 { font-size: 3rem; margin-left: 25px; }
    .subtitle { font-size: 1rem; margin-left: 25px; font-weight: 500; }
    .caption { font-size: 14px; margin-left: 35px; font-weight: 500; }
";

/// Converts a built chart into a plotly figure.
pub fn figure(chart: &Chart) -> Plot {
    let spec = chart.spec;
    let marker = Marker::new().color(spec.color);

    match &chart.data {
        ChartData::Histogram(bins) => {
            let x: Vec<f64> = bins.iter().map(|bin| bin.midpoint()).collect();
            let y: Vec<usize> = bins.iter().map(|bin| bin.count).collect();
            with_layout(chart, Bar::new(x, y).name(spec.title).marker(marker))
        }
        ChartData::Categories(categories) => {
            let x: Vec<String> = categories
                .iter()
                .map(|category| category.category.clone())
                .collect();
            let y: Vec<usize> = categories.iter().map(|category| category.count).collect();
            with_layout(chart, Bar::new(x, y).name(spec.title).marker(marker))
        }
    }
}

fn with_layout<X, Y>(chart: &Chart, trace: Box<Bar<X, Y>>) -> Plot
where
    X: serde::Serialize + Clone + 'static,
    Y: serde::Serialize + Clone + 'static,
{
    let spec = chart.spec;
    let mut x_axis = Axis::new().title(Title::new(spec.x_label));
    if let Some(angle) = spec.tick_angle {
        x_axis = x_axis.tick_angle(angle);
    }

    let layout = Layout::new()
        .title(Title::new(spec.title))
        .x_axis(x_axis)
        .y_axis(Axis::new().title(Title::new(spec.y_label)))
        .bar_gap(spec.bar_gap);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Renders the complete dashboard document.
pub fn render_page(charts: &[Chart]) -> String {
    page_markup(charts).into_string()
}

fn page_markup(charts: &[Chart]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                title { (PAGE_HEADING) }
                link rel="stylesheet" href=(FONT_STYLESHEET);
                script src=(PLOTLY_JS) {}
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                h1 { (PAGE_HEADING) }
                div class="subtitle" { (PAGE_SUBTITLE) }
                @for chart in charts {
                    div class="chart" {
                        (PreEscaped(figure(chart).to_inline_html(Some(chart.spec.id))))
                    }
                    p class="caption" { (chart.spec.caption) }
                }
            }
        }
    }
}
