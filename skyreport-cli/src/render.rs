use std::fmt::Write;

use chrono::{DateTime, FixedOffset};
use skyreport_core::{Forecast, Reports};

const DATE_FORMAT: &str = "%a %d %b %H:%M";

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn line(
    out: &mut String,
    date: &DateTime<FixedOffset>,
    temperature: i32,
    flags: &str,
    title: &str,
    description: &str,
) {
    let _ = writeln!(
        out,
        "{}  {:>4}°C  {}  {} ({})",
        date.format(DATE_FORMAT),
        temperature,
        flags,
        title,
        description,
    );
}

/// One line per forecast slot, under a heading naming the place.
pub fn text(forecast: &Forecast) -> String {
    let mut out = String::new();
    let place = forecast.location_name.as_deref().unwrap_or("Unknown location");
    let _ = writeln!(out, "{place} ({} report)", forecast.reports.kind());

    if forecast.reports.is_empty() {
        out.push_str("No forecast slots returned.\n");
        return out;
    }

    match &forecast.reports {
        Reports::Snow(reports) => {
            for r in reports {
                let flags = format!(
                    "rain: {:<3}  snow: {:<3}",
                    yes_no(r.is_raining),
                    yes_no(r.is_snowing)
                );
                line(
                    &mut out,
                    &r.date,
                    r.temperature_celsius,
                    &flags,
                    &r.weather_title,
                    &r.weather_description,
                );
            }
        }
        Reports::Stargazing(reports) => {
            for r in reports {
                let flags = format!("stargazing: {:<3}", yes_no(r.is_good_for_stargazing));
                line(
                    &mut out,
                    &r.date,
                    r.temperature_celsius,
                    &flags,
                    &r.weather_title,
                    &r.weather_description,
                );
            }
        }
    }

    out
}

pub fn json(forecast: &Forecast) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&forecast.reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyreport_core::{SnowReport, StargazingReport};

    fn date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-15T22:00:00+01:00").unwrap()
    }

    #[test]
    fn snow_lines() {
        let forecast = Forecast {
            location_name: Some("Chamonix-Mont-Blanc, FR".into()),
            reports: Reports::Snow(vec![SnowReport {
                is_raining: false,
                is_snowing: true,
                date: date(),
                temperature_celsius: -5,
                weather_title: "Snow".into(),
                weather_description: "light snow".into(),
            }]),
        };

        let out = text(&forecast);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Chamonix-Mont-Blanc, FR (snow report)"));
        assert_eq!(
            lines.next(),
            Some("Mon 15 Jan 22:00    -5°C  rain: no   snow: yes  Snow (light snow)")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn stargazing_lines() {
        let forecast = Forecast {
            location_name: None,
            reports: Reports::Stargazing(vec![StargazingReport {
                is_good_for_stargazing: true,
                date: date(),
                temperature_celsius: 3,
                weather_title: "Clear".into(),
                weather_description: "clear sky".into(),
            }]),
        };

        let out = text(&forecast);
        assert!(out.starts_with("Unknown location (stargazing report)\n"));
        assert!(out.contains("stargazing: yes"));
        assert!(out.contains("Clear (clear sky)"));
    }

    #[test]
    fn empty_forecast() {
        let forecast = Forecast {
            location_name: Some("Oslo, NO".into()),
            reports: Reports::Snow(vec![]),
        };
        assert!(text(&forecast).contains("No forecast slots returned."));
        assert_eq!(json(&forecast).unwrap(), "[]");
    }
}
