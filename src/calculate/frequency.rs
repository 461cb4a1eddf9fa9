use std::collections::BTreeMap;

use chrono::{Datelike, Timelike, Weekday};

use crate::models::{HourBucket, Match, MatchFrequency, WeekdayBucket};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// 12-hour clock label, e.g. `"12 AM"`, `"3 PM"`.
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Count matches by hour of day and by weekday, in UTC.
///
/// Hours without matches are left out; all seven weekdays are always present.
pub fn calculate_match_frequency(matches: &[Match]) -> MatchFrequency {
    let mut hours: BTreeMap<u32, u32> = BTreeMap::new();
    let mut days = [0u32; 7];

    for m in matches {
        *hours.entry(m.played_at.hour()).or_default() += 1;
        days[m.played_at.weekday().num_days_from_monday() as usize] += 1;
    }

    let by_hour = hours
        .into_iter()
        .map(|(hour, matches)| HourBucket {
            hour,
            label: hour_label(hour),
            matches,
        })
        .collect();

    let by_weekday = WEEK
        .iter()
        .zip(days)
        .map(|(day, matches)| WeekdayBucket {
            day: weekday_name(*day).to_string(),
            matches,
        })
        .collect();

    MatchFrequency {
        by_hour,
        by_weekday,
        total: matches.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(21), "9 PM");
    }

    #[test]
    fn test_frequency_counts() {
        // 2025-03-03 is a Monday
        let monday_evening = Utc.with_ymd_and_hms(2025, 3, 3, 20, 15, 0).unwrap();
        let monday_late = Utc.with_ymd_and_hms(2025, 3, 3, 21, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2025, 3, 8, 20, 45, 0).unwrap();
        let matches = vec![
            Match::new(monday_evening, "a", "b", 1, 0),
            Match::new(monday_late, "a", "b", 1, 0),
            Match::new(saturday, "a", "b", 1, 0),
        ];

        let freq = calculate_match_frequency(&matches);
        assert_eq!(freq.total, 3);

        assert_eq!(freq.by_hour.len(), 2);
        assert_eq!(freq.by_hour[0].hour, 20);
        assert_eq!(freq.by_hour[0].label, "8 PM");
        assert_eq!(freq.by_hour[0].matches, 2);
        assert_eq!(freq.by_hour[1].matches, 1);

        assert_eq!(freq.by_weekday.len(), 7);
        assert_eq!(freq.by_weekday[0].day, "Monday");
        assert_eq!(freq.by_weekday[0].matches, 2);
        assert_eq!(freq.by_weekday[5].day, "Saturday");
        assert_eq!(freq.by_weekday[5].matches, 1);
        assert_eq!(freq.by_weekday[6].matches, 0);
    }

    #[test]
    fn test_frequency_empty() {
        let freq = calculate_match_frequency(&[]);
        assert_eq!(freq.total, 0);
        assert!(freq.by_hour.is_empty());
        assert!(freq.by_weekday.iter().all(|d| d.matches == 0));
    }
}
