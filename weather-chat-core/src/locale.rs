//! Indonesian labels for provider conditions and calendar names.
//!
//! Everything here is a static table; nothing depends on the process locale.

use chrono::{Datelike, NaiveDate, Weekday};

const CONDITIONS: &[(&str, &str)] = &[
    ("clear sky", "cerah"),
    ("few clouds", "sedikit berawan"),
    ("scattered clouds", "berawan"),
    ("broken clouds", "sebagian berawan"),
    ("overcast clouds", "mendung"),
    ("shower rain", "hujan deras"),
    ("light rain", "hujan ringan"),
    ("moderate rain", "hujan sedang"),
    ("heavy intensity rain", "hujan lebat"),
    ("very heavy rain", "hujan sangat lebat"),
    ("freezing rain", "hujan membeku"),
    ("thunderstorm", "badai petir"),
    ("snow", "salju"),
    ("mist", "berkabut"),
    ("haze", "berkabut tipis"),
    ("fog", "kabut"),
    ("sand", "berpasir"),
    ("dust", "berdebu"),
    ("tornado", "angin puting beliung"),
    ("squalls", "angin kencang"),
    ("drizzle", "gerimis"),
    ("light intensity drizzle", "gerimis ringan"),
    ("heavy intensity drizzle", "gerimis lebat"),
    ("ragged shower rain", "hujan tidak merata"),
    ("partly cloudy", "berawan sebagian"),
    ("clouds", "berawan"),
];

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Translates a provider condition and capitalizes it.
///
/// Lookup is case-insensitive. Unknown descriptions are returned as-is,
/// capitalized.
pub fn translate_condition(description: &str) -> String {
    let key = description.trim().to_lowercase();
    let label = CONDITIONS
        .iter()
        .find(|(en, _)| *en == key)
        .map(|(_, id)| *id)
        .unwrap_or(key.as_str());
    capitalize(label)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// `Senin, 20 Okt 2025`
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{}, {:02} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS_SHORT[date.month0() as usize],
        date.year()
    )
}

/// `Senin, 20 Oktober 2025`
pub fn long_date_label(date: NaiveDate) -> String {
    format!(
        "{}, {:02} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}
