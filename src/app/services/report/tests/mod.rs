//! Shared fixtures for report tests
//!
//! Reports are loaded through a full refresh against the in-memory source,
//! so these tests also cover tokenizing, filtering and error skipping.

use super::ReportService;
use crate::app::services::refresh::tests::MockSource;
use crate::app::services::refresh::{DataSource, RecordRefreshController, RefreshStats};


/// Rows from an AirNow reporting-area file
pub const REPORTING_AREA_ROWS: &[&str] = &[
    "05/13/17|05/14/17||CDT|1|F|Y|Baton Rouge Area|LA|30.45|-91.14|OZONE|101|Unhealthy for Sensitive Groups|Yes|Ozone action day declared.|LDEQ",
    "05/13/17|05/13/17||CDT|0|F|Y|Baton Rouge Area|LA|30.45|-91.14|OZONE|||No||LDEQ",
    "05/14/17|05/14/17|10:00|MDT|0|O|Y|Albuquerque|NM|35.0844|-106.6504|OZONE|44|Good|No||NMED",
    "05/13/17|05/13/17||MDT|-1|Y|Y|Albuquerque|NM|35.0844|-106.6504|OZONE|40|Good|No||NMED",
    "05/14/17|05/14/17|10:00|MDT|0|O|N|Albuquerque|NM|35.1|-106.6|PM2.5|60|Moderate|No||NMED",
    "05/14/17|05/14/17|21:4x|PDT|0|O|Y|Los Angeles|CA|34.05|-118.24|PM2.5|80|Moderate|No||SCAQMD",
    "05/14/17|05/14/17|09:00|PDT|0|O|Y|Seattle|WA|47.61|-122.33|PM2.5|30|Good|No||PSCAA",
];

/// Reporting-area rows joined into a newline-terminated body
pub fn reporting_area_body() -> String {
    let mut body = REPORTING_AREA_ROWS.join("\n");
    body.push('\n');
    body
}

/// Refresh a new service from the fixture rows
pub async fn loaded_service() -> (ReportService, RefreshStats) {
    let service = ReportService::new();
    let source = DataSource::new(
        "http://localhost/reportingarea.dat",
        "\n",
        r"\|",
        ReportService::default_layout(),
    );
    let client = MockSource::new(&reporting_area_body(), Some("\"report-v1\""));
    let mut controller = RecordRefreshController::new(source, service.mapper(), client).unwrap();

    let outcome = controller.refresh().await.unwrap();
    let stats = outcome.stats().cloned().unwrap();

    (service, stats)
}
