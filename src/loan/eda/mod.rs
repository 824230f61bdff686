pub mod charts;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod model;
pub mod render;
pub mod server;

pub use error::{DashboardError, Result};
