use std::sync::Arc;

use log::info;

use crate::config::{validate_params, Params, ProviderConfig};
use crate::error::Result;
use crate::fetch::{fetch_all, HttpSeriesSource, SeriesSource};
use crate::table::{render_csv, render_html, MergedTable};
use crate::term::DateWindow;

/// One merged snapshot of every requested instrument over the requested term.
#[derive(Debug, Clone)]
pub struct TrustChart {
    window: DateWindow,
    table: MergedTable,
}

impl TrustChart {
    /// Fetch from the builtin provider using request JSON such as
    /// `{"term": "1y", "brands": [{"id": "89311067", "name": "jrevive"}]}`.
    pub async fn new(params_json: &str) -> Result<Self> {
        Self::with_provider(params_json, ProviderConfig::builtin()).await
    }

    pub async fn with_provider(params_json: &str, provider: ProviderConfig) -> Result<Self> {
        let params = Params::from_json(params_json)?;
        let source = Arc::new(HttpSeriesSource::new(provider)?);
        Self::with_source(&params, source).await
    }

    /// Resolve the term against today and fetch through `source`.
    pub async fn with_source<S: SeriesSource>(params: &Params, source: Arc<S>) -> Result<Self> {
        validate_params(params)?;
        let window = params.term_spec()?.resolve()?;
        Self::with_window(params, window, source).await
    }

    pub async fn with_window<S: SeriesSource>(
        params: &Params,
        window: DateWindow,
        source: Arc<S>,
    ) -> Result<Self> {
        info!(
            "Fetching {} instrument(s) for window {}",
            params.brands.len(),
            window
        );

        let series = fetch_all(source, &params.brands).await?;
        let table = MergedTable::from_series(&window, series);

        info!(
            "Merged {} column(s) into {} dated row(s)",
            table.columns().len(),
            table.row_count()
        );
        Ok(Self { window, table })
    }

    pub fn window(&self) -> &DateWindow {
        &self.window
    }

    pub fn table(&self) -> &MergedTable {
        &self.table
    }

    pub fn csv(&self) -> Result<String> {
        render_csv(&self.table)
    }

    pub fn html(&self) -> Result<String> {
        Ok(render_html(&self.csv()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Instrument;
    use crate::error::AppError;
    use crate::fetch::{FetchResult, RawSeries, SeriesRow};
    use chrono::{Days, Local, NaiveDate};
    use futures::future::BoxFuture;
    use std::collections::HashMap;

    struct FixedSource {
        rows: HashMap<String, Vec<(String, String)>>,
    }

    impl FixedSource {
        fn new(entries: Vec<(&str, Vec<(&str, &str)>)>) -> Arc<Self> {
            Arc::new(Self {
                rows: entries
                    .into_iter()
                    .map(|(id, rows)| {
                        (
                            id.to_string(),
                            rows.iter()
                                .map(|(d, v)| (d.to_string(), v.to_string()))
                                .collect(),
                        )
                    })
                    .collect(),
            })
        }
    }

    impl SeriesSource for FixedSource {
        fn fetch<'a>(
            &'a self,
            instrument: &'a Instrument,
        ) -> BoxFuture<'a, FetchResult<RawSeries>> {
            Box::pin(async move {
                let rows = self
                    .rows
                    .get(&instrument.id)
                    .ok_or_else(|| AppError::message(format!("unknown id {}", instrument.id)))?;
                Ok(RawSeries::new(
                    instrument,
                    rows.iter()
                        .map(|(d, v)| SeriesRow::new(d.as_str(), v.as_str()))
                        .collect(),
                ))
            })
        }
    }

    fn params(term: &str, brands: &[(&str, &str)]) -> Params {
        Params {
            term: term.to_string(),
            brands: brands
                .iter()
                .map(|(id, name)| Instrument::new(*id, *name))
                .collect(),
        }
    }

    fn january() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn single_instrument_end_to_end() {
        let source = FixedSource::new(vec![("X", vec![("20230101", "10"), ("20230201", "20")])]);
        let chart = TrustChart::with_window(&params("1m", &[("X", "Foo")]), january(), source)
            .await
            .unwrap();

        assert_eq!(chart.csv().unwrap(), "Date,Foo\n20230101,10\n");
        assert!(chart
            .html()
            .unwrap()
            .contains(r#"var csv = "Date,Foo\n20230101,10\n";"#));
    }

    #[tokio::test]
    async fn shared_date_with_one_reporter_leaves_an_empty_cell() {
        let source = FixedSource::new(vec![
            ("A", vec![("20230105", "1")]),
            ("B", vec![("20230105", "2"), ("20230106", "3")]),
        ]);
        let chart = TrustChart::with_window(
            &params("1m", &[("A", "Foo"), ("B", "Bar")]),
            january(),
            source,
        )
        .await
        .unwrap();

        let table = chart.table();
        assert_eq!(table.cell_by_name("20230106", "Bar"), Some("3"));
        assert_eq!(table.cell_by_name("20230106", "Foo"), None);

        let csv = chart.csv().unwrap();
        let header = csv.lines().next().unwrap();
        let row = csv.lines().find(|line| line.starts_with("20230106")).unwrap();
        if header == "Date,Foo,Bar" {
            assert_eq!(row, "20230106,,3");
        } else {
            assert_eq!(header, "Date,Bar,Foo");
            assert_eq!(row, "20230106,3");
        }
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_request() {
        let source = FixedSource::new(vec![("A", vec![("20230105", "1")])]);
        let err = TrustChart::with_window(
            &params("1m", &[("A", "Foo"), ("missing", "Bar")]),
            january(),
            source,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Fetch { ref id, .. } if id == "missing"));
    }

    #[tokio::test]
    async fn resolves_term_against_today() {
        let today = Local::now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let key = |date: NaiveDate| date.format("%Y%m%d").to_string();
        let old = today.checked_sub_days(Days::new(30)).unwrap();

        let rows = [(key(old), "1"), (key(yesterday), "2"), (key(today), "3")];
        let rows: Vec<(&str, &str)> = rows.iter().map(|(d, v)| (d.as_str(), *v)).collect();
        let source = FixedSource::new(vec![("X", rows)]);

        let chart = TrustChart::with_source(&params("2d", &[("X", "Foo")]), source)
            .await
            .unwrap();

        assert_eq!(chart.window().to(), today);
        assert_eq!(chart.table().row_count(), 2);
    }

    #[tokio::test]
    async fn rejects_malformed_term_before_fetching() {
        let source = FixedSource::new(Vec::new());
        let err = TrustChart::with_source(&params("1w", &[("X", "Foo")]), source)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTerm { .. }));
    }

    #[tokio::test]
    async fn rejects_malformed_request_json() {
        let err = TrustChart::new("{not json").await.unwrap_err();
        assert!(err.to_string().contains("request parameters"));
    }
}
