use futures::future::BoxFuture;

use crate::config::Instrument;
use crate::error::Result;

pub mod coordinator;
pub mod decode;
pub mod provider;
pub mod request;

pub use coordinator::fetch_all;
pub use decode::decode_series_body;
pub use provider::HttpSeriesSource;
pub use request::series_url;

pub type FetchResult<T> = Result<T>;

/// One provider row: compact `YYYYMMDD` date and the raw value text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRow {
    pub date: String,
    pub value: String,
}

impl SeriesRow {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// Unfiltered history for one instrument, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeries {
    pub id: String,
    pub name: String,
    pub rows: Vec<SeriesRow>,
}

impl RawSeries {
    pub fn new(instrument: &Instrument, rows: Vec<SeriesRow>) -> Self {
        Self {
            id: instrument.id.clone(),
            name: instrument.name.clone(),
            rows,
        }
    }
}

/// Retrieves the full history of a single instrument.
pub trait SeriesSource: Send + Sync + 'static {
    fn fetch<'a>(&'a self, instrument: &'a Instrument) -> BoxFuture<'a, FetchResult<RawSeries>>;
}
