//! Chart definitions and the routine that turns a record table into chart data.
//!
//! Every chart on the dashboard is described by one entry of [`CHART_SPECS`];
//! [`build_charts`] walks that table in order and produces one [`Chart`] per
//! entry. Charts are pure functions of the record table and never change once
//! built.

pub mod categorical;
pub mod histogram;

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::loan::eda::error::{DashboardError, Result};
use crate::loan::eda::model::Table;

pub use categorical::{CategoryCount, count_categories};
pub use histogram::{Bin, bin_values};

/// Columns converted to numbers before any chart is built.
pub const COERCED_COLUMNS: [&str; 4] = [
    "Amount_issued",
    "Baking_Loan_Close",
    "TotalSaldoTotal_2",
    "ValorMora_2",
];

/// How a column is summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    /// Equal-width histogram over the numeric cells of the column.
    Histogram { bins: usize },
    /// One bar per distinct literal value of the column.
    Categorical,
}

/// Fixed description of one dashboard chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Element id of the chart on the page.
    pub id: &'static str,
    /// Source column in the record sheet.
    pub column: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Any CSS colour understood by plotly.js.
    pub color: &'static str,
    /// Fraction of the bar slot left empty between adjacent bars.
    pub bar_gap: f64,
    /// Rotation of the x axis tick labels, in degrees.
    pub tick_angle: Option<f64>,
    /// Commentary shown under the chart.
    pub caption: &'static str,
}

const FREQUENCY: &str = "Frequency";

#[allow(clippy::too_many_arguments)]
const fn histogram(
    id: &'static str,
    column: &'static str,
    bins: usize,
    title: &'static str,
    x_label: &'static str,
    color: &'static str,
    bar_gap: f64,
    caption: &'static str,
) -> ChartSpec {
    ChartSpec {
        id,
        column,
        kind: ChartKind::Histogram { bins },
        title,
        x_label,
        y_label: FREQUENCY,
        color,
        bar_gap,
        tick_angle: None,
        caption,
    }
}

/// The dashboard charts, in page order.
pub static CHART_SPECS: [ChartSpec; 11] = [
    histogram(
        "amount-issued-bar",
        "Amount_issued",
        30,
        "Distribution of Loan Amounts",
        "Loan Amount",
        "#636EFA",
        0.1,
        "Como se puede ver, el monto más común de préstamos está entre $200.000 y $240.000.",
    ),
    histogram(
        "Baking_Loan_delinquency",
        "Baking_Loan_delinquency",
        30,
        "Distribution of Loan Delinquency",
        "Delinquency Value",
        "green",
        0.1,
        "Alrededor del 95% de los clientes tienen cero obligaciones en mora.",
    ),
    histogram(
        "Term",
        "Term",
        20,
        "Distribution of Loan Terms",
        "Loan Term (Days)",
        "orange",
        0.0,
        "La duración de los préstamos, frecuentemete, es de 30 días, seguido por 20 días",
    ),
    histogram(
        "AntiFraud_score",
        "AntiFraud_score",
        20,
        "Distribution of Anti-Fraud Scores",
        "Anti-Fraud Score",
        "#F5004F",
        0.0,
        "Para este indicador se observan valores bajos, menores a 1. Lo que indica que la acción es segura y se aprobará en la mayoría de los casos.",
    ),
    histogram(
        "Accounts",
        "Accounts",
        20,
        "Distribution of Client Accounts",
        "Number of Accounts",
        "purple",
        0.0,
        "La mayoría de los clientes tienen entre 1 y 4 cuentas bancarias, pero también un gran porcentaje tienen 5 o más.",
    ),
    histogram(
        "Real_TipoEntidad_AFIS",
        "Real_TipoEntidad_AFIS",
        15,
        "Distribution of Entity Types (AFIS)",
        "Entity Type (AFIS)",
        "cyan",
        0.0,
        "La cantidad de obligaciones por tipo de entidad está entre 0 y 4.",
    ),
    histogram(
        "Baking_Loan_at_day",
        "Baking_Loan_at_day",
        20,
        "Distribution of Baking Loan at Day",
        "Baking Loan at Day",
        "magenta",
        0.0,
        "Gran parte de los clientes tiene sus obligacion al día, ya que más del 90% de los clientes tienen entre 0 y 4.",
    ),
    histogram(
        "Baking_Loan_Close",
        "Baking_Loan_Close",
        20,
        "Distribution of Loan Close-Out Values",
        "Loan Close-Out Value",
        "brown",
        0.0,
        "Más de 11.000 clientes tienen saldadas hasta 50 obligaciones",
    ),
    histogram(
        "TotalSaldoTotal_2",
        "TotalSaldoTotal_2",
        20,
        "Distribution of Total Outstanding Balances",
        "Total Outstanding Balance",
        "teal",
        0.0,
        "La deuda total no supera los $40.000.000 en la gran mayoría",
    ),
    histogram(
        "ValorMora_2",
        "ValorMora_2",
        20,
        "Distribution of Overdue Loan Amounts (Valor Mora)",
        "Overdue Amount",
        "darkgreen",
        0.0,
        "El saldo reportado en mora no supera los $500.000, en un gran porcentaje.",
    ),
    ChartSpec {
        id: "distribution-of-loan-issuances-by-age-range",
        column: "RangoEdad",
        kind: ChartKind::Categorical,
        title: "Distribution of Loan Issuances by Age Range",
        x_label: "Age Range",
        y_label: "Number of Loans",
        color: "skyblue",
        bar_gap: 0.2,
        tick_angle: Some(-45.0),
        caption: "Se puede ver que la gente entre 31 y 35 años es más propensa a realizar préstamos. \
                  Incluso, personas más jóvenes entre 18 y 30 años tienen un porcentaje alto. \
                  Este porcentaje decae para personas mayores de 55 años.",
    },
];

/// Summarised values of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items")]
pub enum ChartData {
    Histogram(Vec<Bin>),
    Categories(Vec<CategoryCount>),
}

/// A built chart: its fixed description plus the data computed for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub spec: &'static ChartSpec,
    pub data: ChartData,
}

impl Chart {
    /// Sum of all bar heights; equals the number of non-missing source values.
    pub fn total_count(&self) -> usize {
        match &self.data {
            ChartData::Histogram(bins) => bins.iter().map(|bin| bin.count).sum(),
            ChartData::Categories(categories) => {
                categories.iter().map(|category| category.count).sum()
            }
        }
    }

    /// Number of bars drawn.
    pub fn bar_count(&self) -> usize {
        match &self.data {
            ChartData::Histogram(bins) => bins.len(),
            ChartData::Categories(categories) => categories.len(),
        }
    }
}

/// Builds a single chart from the record table.
#[instrument(level = "debug", skip_all, fields(column = spec.column))]
pub fn build_chart(spec: &'static ChartSpec, table: &Table) -> Result<Chart> {
    let data = match spec.kind {
        ChartKind::Histogram { bins } => {
            let bins = NonZeroUsize::new(bins).ok_or_else(|| DashboardError::InvalidBinCount {
                column: spec.column.to_string(),
            })?;
            let values = table.numeric_values(spec.column)?;
            ChartData::Histogram(bin_values(&values, bins))
        }
        ChartKind::Categorical => {
            ChartData::Categories(count_categories(table.category_values(spec.column)?))
        }
    };

    let chart = Chart { spec, data };
    debug!(
        bars = chart.bar_count(),
        total = chart.total_count(),
        "chart built"
    );
    Ok(chart)
}

/// Builds every chart of [`CHART_SPECS`] in page order, stopping at the first
/// column the table does not carry.
pub fn build_charts(table: &Table) -> Result<Vec<Chart>> {
    CHART_SPECS
        .iter()
        .map(|spec| build_chart(spec, table))
        .collect()
}
