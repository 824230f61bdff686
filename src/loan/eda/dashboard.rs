use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::loan::eda::charts::{COERCED_COLUMNS, Chart, build_charts};
use crate::loan::eda::error::Result;
use crate::loan::eda::io::excel_read::{LoanWorkbook, load_workbook};
use crate::loan::eda::model::Table;
use crate::loan::eda::render::render_page;

/// Everything the dashboard serves, computed once at startup.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub workbook: LoanWorkbook,
    pub charts: Vec<Chart>,
    /// Rendered HTML document, shared with every request.
    pub page: Arc<str>,
}

impl Dashboard {
    /// Loads the workbook at `path`, cleans the numeric columns, builds every
    /// chart, and renders the page.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn prepare(path: &Path) -> Result<Self> {
        let mut workbook = load_workbook(path)?;
        coerce_columns(&mut workbook.records)?;
        Self::from_workbook(workbook)
    }

    /// Builds charts and the page from an already cleaned workbook.
    pub fn from_workbook(workbook: LoanWorkbook) -> Result<Self> {
        let charts = build_charts(&workbook.records)?;
        info!(chart_count = charts.len(), "charts built");
        let page: Arc<str> = Arc::from(render_page(&charts));
        debug!(bytes = page.len(), "page rendered");
        Ok(Self {
            workbook,
            charts,
            page,
        })
    }
}

/// Coerces every column of [`COERCED_COLUMNS`] in place.
pub fn coerce_columns(records: &mut Table) -> Result<()> {
    for column in COERCED_COLUMNS {
        let report = records.coerce_numeric(column)?;
        if report.dropped > 0 {
            warn!(
                column,
                dropped = report.dropped,
                "non-numeric values treated as missing"
            );
        }
        debug!(column, ?report, "column coerced");
    }
    Ok(())
}
