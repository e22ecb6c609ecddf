//! Lookup command: load one dataset and answer a single query

use crate::app::services::datasets::{Datasets, Services};
use crate::app::services::http_source::ReqwestSource;
use crate::cli::args::{Args, LookupArgs, Query};
use crate::cli::commands::shared::{load_config, print_outcome, with_spinner};
use crate::{Error, Result};
use colored::*;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Refresh the dataset the query needs and print the answer
pub async fn run_lookup(
    args: &Args,
    lookup_args: &LookupArgs,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let config = load_config(args)?;
    let client = ReqwestSource::new(&config.http)?;
    let mut datasets = Datasets::from_config(&config, client)?;
    let dataset = lookup_args.query.dataset();

    let outcome = with_spinner(
        &format!("Loading {} dataset...", dataset),
        args.show_progress(),
        &cancellation_token,
        datasets.refresh_dataset(dataset),
    )
    .await?;

    if args.show_progress() {
        print_outcome(dataset, &outcome);
    }

    let value = answer(datasets.services(), &lookup_args.query)?;

    if lookup_args.json {
        let rendered = serde_json::to_string_pretty(&value)
            .map_err(|e| Error::configuration(format!("Failed to render JSON: {}", e)))?;
        println!("{}", rendered);
    } else {
        print_answer(&value);
    }

    Ok(())
}

/// Answer a query from loaded services as a JSON value
pub fn answer(services: &Services, query: &Query) -> Result<Value> {
    let value = match query {
        Query::Area { zip_code } => json!({
            "zipCode": zip_code,
            "area": services.area.get_area(zip_code)?,
        }),
        Query::Zip { city, state } => json!({
            "city": city,
            "state": state,
            "zipCode": services.geo.get_zip_code(city, state)?,
        }),
        Query::State { zip_code } => json!({
            "zipCode": zip_code,
            "state": services.geo.get_state(zip_code)?,
        }),
        Query::City { zip_code } => {
            let city_and_state = services.geo.get_city_and_state(zip_code)?;
            json!({
                "zipCode": zip_code,
                "city": city_and_state.city(),
                "state": city_and_state.state(),
            })
        }
        Query::Forecast { area, offset_days } => json!({
            "area": area,
            "offsetDays": offset_days,
            "report": services.report.get_forecast_report(area, *offset_days)?,
        }),
        Query::Observation { area } => json!({
            "area": area,
            "report": services.report.get_observation_report(area)?,
        }),
        Query::Nearest {
            latitude,
            longitude,
        } => json!({
            "latitude": latitude,
            "longitude": longitude,
            "area": services.report.find_nearest_area(*latitude, *longitude)?,
        }),
    };

    Ok(value)
}

fn print_answer(answer: &Value) {
    let Some(fields) = answer.as_object() else {
        println!("{}", answer);
        return;
    };

    for (key, value) in fields {
        match value {
            Value::Object(nested) => {
                println!("{}:", key.bold());
                for (nested_key, nested_value) in nested {
                    println!("  {:<14} {}", nested_key.cyan(), plain(nested_value));
                }
            }
            other => println!("{:<16} {}", key.bold(), plain(other)),
        }
    }
}

/// Strings without their JSON quotes
fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::area::AreaService;
    use crate::app::services::field_mapper::{RecordMapper, Tokenizer};

    fn services_with_area(lines: &[&str]) -> Services {
        let services = Services::default();
        let mapper = services.area.mapper();
        let layout = AreaService::default_layout();
        let tokenizer = Tokenizer::new(r"\|", false).unwrap();

        for line in lines {
            let fields = tokenizer.split(line);
            mapper.map(&layout.record(&fields)).unwrap();
        }
        services
    }

    #[test]
    fn test_answer_area_query() {
        let services = services_with_area(&["70801|Baton Rouge Area"]);

        let value = answer(
            &services,
            &Query::Area {
                zip_code: "70801".to_string(),
            },
        )
        .unwrap();

        assert_eq!(value["area"], "Baton Rouge Area");
        assert_eq!(value["zipCode"], "70801");
    }

    #[test]
    fn test_answer_missing_key_is_not_found() {
        let services = Services::default();

        let error = answer(
            &services,
            &Query::Observation {
                area: "foo".to_string(),
            },
        )
        .unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Unable to find observation report of foo");
    }

    #[test]
    fn test_plain_strips_quotes() {
        assert_eq!(plain(&json!("Good")), "Good");
        assert_eq!(plain(&json!(101)), "101");
    }
}
