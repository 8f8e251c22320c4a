pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod table;
pub mod term;

pub use chart::TrustChart;
pub use config::{Instrument, Params, ProviderConfig};
pub use error::{AppError, Result};
pub use fetch::{fetch_all, HttpSeriesSource, RawSeries, SeriesRow, SeriesSource};
pub use table::MergedTable;
pub use term::{DateWindow, TermSpec, TermUnit};
