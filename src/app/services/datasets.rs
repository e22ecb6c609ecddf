//! Wiring of services, mappers and refresh controllers from configuration

use crate::app::services::area::{AreaMapper, AreaService};
use crate::app::services::geo::{GeoMapper, GeoService};
use crate::app::services::http_source::HttpSource;
use crate::app::services::refresh::{RecordRefreshController, RefreshOutcome};
use crate::app::services::report::{ReportMapper, ReportService};
use crate::app::services::scheduler::spawn_periodic_refresh;
use crate::config::Config;
use crate::constants::{DATASET_AREA, DATASET_GEO, DATASET_NAMES, DATASET_REPORT};
use crate::{Error, Result};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Read side of every dataset
///
/// Cheap to clone; clones share the lookup tables.
#[derive(Debug, Clone, Default)]
pub struct Services {
    pub area: AreaService,
    pub geo: GeoService,
    pub report: ReportService,
}

/// Every dataset's services together with the controllers that fill them
#[derive(Debug)]
pub struct Datasets<C> {
    services: Services,
    area: RecordRefreshController<AreaMapper, C>,
    geo: RecordRefreshController<GeoMapper, C>,
    report: RecordRefreshController<ReportMapper, C>,
    intervals: [Duration; 3],
}

impl<C> Datasets<C>
where
    C: HttpSource + Clone + 'static,
{
    /// Build empty services and one controller per dataset
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if a dataset's layout lacks a
    ///   required role or its delimiters are invalid
    pub fn from_config(config: &Config, client: C) -> Result<Self> {
        let services = Services::default();

        let area = RecordRefreshController::new(
            config.area.data_source(&AreaService::default_layout()),
            services.area.mapper(),
            client.clone(),
        )?;
        let geo = RecordRefreshController::new(
            config.geo.data_source(&GeoService::default_layout()),
            services.geo.mapper()?,
            client.clone(),
        )?;
        let report = RecordRefreshController::new(
            config.report.data_source(&ReportService::default_layout()),
            services.report.mapper(),
            client,
        )?;

        Ok(Self {
            services,
            area,
            geo,
            report,
            intervals: [
                config.area.refresh_interval(),
                config.geo.refresh_interval(),
                config.report.refresh_interval(),
            ],
        })
    }

    /// Read side of the datasets
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Refresh all datasets concurrently
    ///
    /// Returns the outcome per dataset name, in refresh order.
    ///
    /// # Errors
    /// * Returns the first refresh failure; the other refreshes still run
    ///   to completion
    pub async fn refresh_all(&mut self) -> Result<Vec<(String, RefreshOutcome)>> {
        let (area, geo, report) =
            tokio::join!(self.area.refresh(), self.geo.refresh(), self.report.refresh());

        Ok(vec![
            (self.area.dataset().to_string(), area?),
            (self.geo.dataset().to_string(), geo?),
            (self.report.dataset().to_string(), report?),
        ])
    }

    /// Refresh a single dataset by name
    ///
    /// # Errors
    /// * `Error::Configuration` if the name is not a known dataset
    /// * Any refresh failure of that dataset
    pub async fn refresh_dataset(&mut self, dataset: &str) -> Result<RefreshOutcome> {
        match dataset {
            DATASET_AREA => self.area.refresh().await,
            DATASET_GEO => self.geo.refresh().await,
            DATASET_REPORT => self.report.refresh().await,
            other => Err(Error::configuration(format!(
                "Unknown dataset '{}', expected one of {}",
                other,
                DATASET_NAMES.join(", ")
            ))),
        }
    }

    /// Hand each controller to its own periodic refresh task
    pub fn spawn_periodic(self, cancellation_token: &CancellationToken) -> (Services, RefreshTasks<C>) {
        let [area_interval, geo_interval, report_interval] = self.intervals;

        info!(
            "Scheduling refreshes every {:?} (area), {:?} (geo), {:?} (report)",
            area_interval, geo_interval, report_interval
        );

        let tasks = RefreshTasks {
            area: spawn_periodic_refresh(self.area, area_interval, cancellation_token.clone()),
            geo: spawn_periodic_refresh(self.geo, geo_interval, cancellation_token.clone()),
            report: spawn_periodic_refresh(
                self.report,
                report_interval,
                cancellation_token.clone(),
            ),
        };

        (self.services, tasks)
    }
}

/// Handles of the periodic refresh tasks
#[derive(Debug)]
pub struct RefreshTasks<C> {
    area: JoinHandle<RecordRefreshController<AreaMapper, C>>,
    geo: JoinHandle<RecordRefreshController<GeoMapper, C>>,
    report: JoinHandle<RecordRefreshController<ReportMapper, C>>,
}

impl<C> RefreshTasks<C> {
    /// Wait for every task to stop
    ///
    /// # Errors
    /// * Returns `Error::Interrupted` if a task panicked or was aborted
    pub async fn join(self) -> Result<()> {
        let (area, geo, report) = tokio::join!(self.area, self.geo, self.report);

        for (dataset, result) in [
            (DATASET_AREA, area.map(|_| ())),
            (DATASET_GEO, geo.map(|_| ())),
            (DATASET_REPORT, report.map(|_| ())),
        ] {
            result.map_err(|e| {
                Error::interrupted(format!("Refresh task for '{}' failed: {}", dataset, e))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::refresh::tests::MockSource;
    use crate::config::DataSourceConfig;

    fn config() -> Config {
        Config {
            http: Default::default(),
            area: DataSourceConfig::new("http://localhost/area.txt", "\n", "\\|", 60_000),
            geo: DataSourceConfig::new("http://localhost/geo.csv", "\n", ",", 60_000),
            report: DataSourceConfig::new("http://localhost/report.dat", "\n", "\\|", 60_000),
        }
    }

    #[tokio::test]
    async fn test_refresh_all_and_shutdown() {
        let client = MockSource::new("", Some("\"empty\""));
        let mut datasets = Datasets::from_config(&config(), client.clone()).unwrap();

        let outcomes = datasets.refresh_all().await.unwrap();

        let names: Vec<_> = outcomes.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec![DATASET_AREA, DATASET_GEO, DATASET_REPORT]);
        assert!(outcomes.iter().all(|(_, outcome)| !outcome.is_up_to_date()));
        assert_eq!(client.fetches(), 3);

        let token = CancellationToken::new();
        let (services, tasks) = datasets.spawn_periodic(&token);
        token.cancel();
        tasks.join().await.unwrap();

        assert!(services.area.is_empty());
        assert!(services.geo.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_single_dataset() {
        let client = MockSource::new("70801|Baton Rouge Area\n", None);
        let mut datasets = Datasets::from_config(&config(), client.clone()).unwrap();

        datasets.refresh_dataset(DATASET_AREA).await.unwrap();

        assert_eq!(client.fetches(), 1);
        assert_eq!(
            datasets.services().area.get_area("70801").unwrap(),
            "Baton Rouge Area"
        );
        let error = datasets.refresh_dataset("weather").await.unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
        assert!(error.to_string().contains("expected one of area, geo, report"));
    }

    #[tokio::test]
    async fn test_refresh_all_reports_failure() {
        let client = MockSource::new("", None);
        client.update(|r| r.fetch_status = 503);
        let mut datasets = Datasets::from_config(&config(), client).unwrap();

        let error = datasets.refresh_all().await.unwrap_err();

        assert!(matches!(error, Error::Downstream { status_code: 503, .. }));
    }
}
