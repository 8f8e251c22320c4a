use std::sync::Arc;

use log::{debug, warn};
use tokio::task::JoinSet;

use crate::config::Instrument;
use crate::error::AppError;

use super::{FetchResult, RawSeries, SeriesSource};

/// Fetch every instrument concurrently and return the series in completion order.
///
/// The first failure wins: outstanding fetches are aborted and the error is
/// returned on its own. The tasks live in a `JoinSet` owned by this future, so
/// dropping the call part-way aborts them as well.
pub async fn fetch_all<S: SeriesSource>(
    source: Arc<S>,
    instruments: &[Instrument],
) -> FetchResult<Vec<RawSeries>> {
    let total = instruments.len();
    let mut tasks = JoinSet::new();
    for instrument in instruments.iter().cloned() {
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            source
                .fetch(&instrument)
                .await
                .map_err(|err| AppError::fetch(&instrument.id, err))
        });
    }

    let mut collected = Vec::with_capacity(total);
    let failure = loop {
        match tasks.join_next().await {
            Some(Ok(Ok(series))) => {
                debug!(
                    "Received {} ({} rows), {}/{} complete",
                    series.id,
                    series.rows.len(),
                    collected.len() + 1,
                    total
                );
                collected.push(series);
            }
            Some(Ok(Err(err))) => break Some(err),
            Some(Err(err)) => break Some(AppError::from(err)),
            None => break None,
        }
    };

    match failure {
        None => Ok(collected),
        Some(err) => {
            if !tasks.is_empty() {
                warn!("Aborting {} outstanding fetch(es) after failure", tasks.len());
            }
            tasks.abort_all();
            while tasks.join_next().await.is_some() {}
            Err(err)
        }
    }
}
