use serde::{Deserialize, Serialize};

const TOMORROW: &str = "besok";
const DAY_AFTER: &str = "lusa";
const MULTI_DAY: &[&str] = &["beberapa hari", "ke depan", "forecast"];

/// Which day (or days) an utterance asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRef {
    Today,
    Tomorrow,
    DayAfter,
    MultiDay,
}

impl TimeRef {
    /// Day offset from today; `None` for a multi-day forecast.
    pub fn day_offset(self) -> Option<i64> {
        match self {
            TimeRef::Today => Some(0),
            TimeRef::Tomorrow => Some(1),
            TimeRef::DayAfter => Some(2),
            TimeRef::MultiDay => None,
        }
    }
}

/// Classifies an utterance by keyword. The first matching rule wins:
/// tomorrow, then day after tomorrow, then multi-day phrasing, else today.
pub fn classify(utterance: &str) -> TimeRef {
    let text = utterance.to_lowercase();

    if text.contains(TOMORROW) {
        TimeRef::Tomorrow
    } else if text.contains(DAY_AFTER) {
        TimeRef::DayAfter
    } else if MULTI_DAY.iter().any(|k| text.contains(k)) {
        TimeRef::MultiDay
    } else {
        TimeRef::Today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_time_refs() {
        assert_eq!(classify("cuaca besok di Bandung"), TimeRef::Tomorrow);
        assert_eq!(classify("Lusa hujan nggak di Medan?"), TimeRef::DayAfter);
        assert_eq!(classify("cuaca beberapa hari di Jakarta"), TimeRef::MultiDay);
        assert_eq!(classify("5 hari ke depan di Malang"), TimeRef::MultiDay);
        assert_eq!(classify("FORECAST surabaya"), TimeRef::MultiDay);
        assert_eq!(classify("cuaca di Jakarta"), TimeRef::Today);
    }

    #[test]
    fn tomorrow_and_day_after_beat_multi_day_phrasing() {
        assert_eq!(classify("forecast besok dan lusa"), TimeRef::Tomorrow);
        assert_eq!(classify("lusa dan beberapa hari ke depan"), TimeRef::DayAfter);
    }

    #[test]
    fn offsets() {
        assert_eq!(TimeRef::Today.day_offset(), Some(0));
        assert_eq!(TimeRef::Tomorrow.day_offset(), Some(1));
        assert_eq!(TimeRef::DayAfter.day_offset(), Some(2));
        assert_eq!(TimeRef::MultiDay.day_offset(), None);
    }
}
