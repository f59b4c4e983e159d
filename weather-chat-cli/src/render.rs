//! Plain-terminal rendering of assistant replies.

use std::fmt::Write as _;

use weather_chat_core::{DaySummary, ForecastReport, Reply};

pub fn print_reply(reply: &Reply) {
    println!("{}", format_reply(reply));
}

pub fn format_reply(reply: &Reply) -> String {
    match reply {
        Reply::Text { text } => text.clone(),
        Reply::Error { text } => format!("⚠ {text}"),
        Reply::IconText { icon_url, text } => format!("{text}\n  ({icon_url})"),
        Reply::Forecast(report) => format_forecast(report),
    }
}

fn format_forecast(report: &ForecastReport) -> String {
    let mut out = report.text.clone();

    if let (Some(first), Some(last)) = (report.series.first(), report.series.last()) {
        let _ = write!(
            out,
            "\n  {} titik data, {} s/d {} UTC",
            report.series.len(),
            first.time.format("%d/%m %H:%M"),
            last.time.format("%d/%m %H:%M"),
        );
    }

    for day in &report.days {
        out.push('\n');
        out.push_str(&format_day(day));
    }
    out
}

fn format_day(day: &DaySummary) -> String {
    let mut out = format!("📅 {} — {}", day.label, day.headline());
    for hour in &day.hours {
        let _ = write!(
            out,
            "\n   {}  {:>8}  {:>4}  {}",
            hour.time, hour.temperature, hour.humidity, hour.condition
        );
    }
    out
}
