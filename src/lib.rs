//! Core library for the loan-eda dashboard.
//!
//! The dashboard is computed once at startup: the workbook reader lives under
//! [`loan::eda::io`], cell and table types inside [`loan::eda::model`], chart
//! definitions and binning in [`loan::eda::charts`], page rendering in
//! [`loan::eda::render`], and the HTTP routes under [`loan::eda::server`].
//! [`loan::eda::dashboard`] ties the steps together.

pub mod loan;

pub use loan::eda::{DashboardError, Result, charts, dashboard, error, io, model, render, server};
