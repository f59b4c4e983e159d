//! Day grouping and summaries over raw forecast samples.
//!
//! Samples are bucketed by their UTC calendar date. Within a day the
//! provider's order is kept, and the dominant condition ties go to the
//! condition seen first in that order.

use chrono::NaiveDate;

use crate::{
    locale::{day_label, translate_condition},
    model::{DaySummary, HourDetail, WeatherSample, icon_url},
};

/// Outcome of asking for a single day's forecast.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Available(DaySummary),
    NotAvailable,
}

/// Groups samples by UTC date, most recent day first.
pub fn aggregate_multi(samples: &[WeatherSample]) -> Vec<DaySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&WeatherSample>)> = Vec::new();

    for sample in samples {
        let date = sample.time.date_naive();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, group)) => group.push(sample),
            None => groups.push((date, vec![sample])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| b.cmp(a));

    groups
        .into_iter()
        .map(|(date, group)| summarize(date, &group))
        .collect()
}

/// Summary for the samples that fall on `target`, if any.
pub fn aggregate_single_day(samples: &[WeatherSample], target: NaiveDate) -> DayOutcome {
    let group: Vec<&WeatherSample> = samples
        .iter()
        .filter(|s| s.time.date_naive() == target)
        .collect();

    if group.is_empty() {
        return DayOutcome::NotAvailable;
    }
    DayOutcome::Available(summarize(target, &group))
}

/// `group` must be non-empty.
fn summarize(date: NaiveDate, group: &[&WeatherSample]) -> DaySummary {
    let conditions: Vec<String> = group.iter().map(|s| translate_condition(&s.condition)).collect();

    let hours = group
        .iter()
        .zip(&conditions)
        .map(|(s, condition)| HourDetail {
            time: s.time.format("%H:%M").to_string(),
            temperature: format!("{:.2}°C", s.temperature_c),
            humidity: format!("{}%", s.humidity_pct),
            condition: condition.clone(),
            icon_url: icon_url(&s.icon),
        })
        .collect();

    DaySummary {
        date,
        label: day_label(date),
        mean_temperature_c: mean(group.iter().map(|s| s.temperature_c)),
        dominant_condition: dominant(&conditions),
        hours,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Most frequent value; ties go to the earliest one.
fn dominant(values: &[String]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.is_none_or(|(_, m)| n > m) {
            best = Some((value, n));
        }
    }
    best.map(|(v, _)| v.to_string()).unwrap_or_default()
}
