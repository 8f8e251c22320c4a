use crate::config::Instrument;
use crate::error::{AppError, Context};

use super::{FetchResult, RawSeries, SeriesRow};

/// Decode a provider CSV body: first field is the date, second the value.
///
/// Every record is kept, header lines included; they never match a `YYYYMMDD`
/// window and drop out during the merge. Records must share one width.
pub fn decode_series_body(instrument: &Instrument, body: &str) -> FetchResult<RawSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .with_context(|| format!("Failed to read history record for {}", instrument.id))?;

        if record.iter().all(str::is_empty) {
            continue;
        }

        let (Some(date), Some(value)) = (record.get(0), record.get(1)) else {
            return Err(AppError::message(format!(
                "History record {} for {} has fewer than two fields",
                idx + 1,
                instrument.id
            )));
        };

        rows.push(SeriesRow::new(date, value));
    }

    Ok(RawSeries::new(instrument, rows))
}
