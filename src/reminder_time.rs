use std::fmt;

use chrono::NaiveDateTime;

/// Canonical 12-hour clock value attached to every todo, e.g. `"02:15 PM"`.
///
/// Times entered as 24-hour `"HH:MM"` are converted once, on creation. When
/// no time is given the current wall clock is captured instead, seconds
/// included (`"07:35:02 PM"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderTime(String);

impl ReminderTime {
    /// Builds the canonical form from an optional 24-hour `"HH:MM"` input.
    ///
    /// Never fails: an unparseable hour reads as 0 and hours outside 0..=23
    /// wrap by modulo, so malformed input degrades to a well-formed value.
    /// The minute part is carried over as typed.
    pub fn normalize(time24: Option<&str>, now: NaiveDateTime) -> Self {
        let Some(raw) = time24.filter(|raw| !raw.is_empty()) else {
            return Self(now.format("%I:%M:%S %p").to_string());
        };

        let mut parts = raw.split(':');
        let hour: u32 = parts.next().and_then(|h| h.parse().ok()).unwrap_or(0);
        let minute = parts.next().unwrap_or("0");

        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };

        Self(format!("{hour12:02}:{minute} {meridiem}"))
    }

    /// Recovers the 24-hour `(hour, minute)` pair for schedule matching. A
    /// trailing seconds component from the current-time form is ignored.
    pub fn hour_minute(&self) -> (u32, u32) {
        let (clock, meridiem) = self.0.split_once(' ').unwrap_or((self.0.as_str(), ""));

        let mut parts = clock.split(':');
        let mut hour: u32 = parts.next().and_then(|h| h.parse().ok()).unwrap_or(0);
        let minute: u32 = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);

        if meridiem == "PM" && hour != 12 {
            hour += 12;
        }
        if meridiem == "AM" && hour == 12 {
            hour = 0;
        }

        (hour, minute)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    use super::ReminderTime;

    fn some_evening() -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            NaiveTime::from_hms_opt(19, 35, 2).unwrap(),
        )
    }

    #[test]
    fn midnight_input_becomes_twelve_am() {
        let time = ReminderTime::normalize(Some("00:00"), some_evening());

        assert_eq!(time.to_string(), "12:00 AM");
    }

    #[test]
    fn half_past_noon_stays_twelve_thirty_pm() {
        let time = ReminderTime::normalize(Some("12:30"), some_evening());

        assert_eq!(time.to_string(), "12:30 PM");
    }

    #[test]
    fn last_minute_of_the_day_becomes_eleven_fifty_nine_pm() {
        let time = ReminderTime::normalize(Some("23:59"), some_evening());

        assert_eq!(time.to_string(), "11:59 PM");
    }

    #[test]
    fn morning_input_keeps_its_leading_zero() {
        let time = ReminderTime::normalize(Some("09:05"), some_evening());

        assert_eq!(time.to_string(), "09:05 AM");
    }

    #[test]
    fn absent_input_captures_the_clock_with_seconds() {
        let time = ReminderTime::normalize(None, some_evening());

        assert_eq!(time.to_string(), "07:35:02 PM");
        assert_eq!(time.hour_minute(), (19, 35));
    }

    #[test]
    fn empty_input_is_treated_as_absent() {
        let absent = ReminderTime::normalize(None, some_evening());
        let empty = ReminderTime::normalize(Some(""), some_evening());

        assert_eq!(absent, empty);
    }

    #[test]
    fn noon_and_midnight_convert_back() {
        let noon = ReminderTime::normalize(Some("12:00"), some_evening());
        let midnight = ReminderTime::normalize(Some("00:30"), some_evening());

        assert_eq!(noon.hour_minute(), (12, 0));
        assert_eq!(midnight.hour_minute(), (0, 30));
    }

    #[test]
    fn out_of_range_hour_wraps_instead_of_failing() {
        let time = ReminderTime::normalize(Some("25:30"), some_evening());

        assert_eq!(time.to_string(), "01:30 PM");
        assert_eq!(time.hour_minute(), (13, 30));
    }

    #[test]
    fn unparseable_hour_reads_as_midnight() {
        let time = ReminderTime::normalize(Some("later:30"), some_evening());

        assert_eq!(time.to_string(), "12:30 AM");
        assert_eq!(time.hour_minute(), (0, 30));
    }

    proptest! {
        #[test]
        fn valid_input_round_trips(hour in 0u32..24, minute in 0u32..60) {
            let input = format!("{hour:02}:{minute:02}");
            let time = ReminderTime::normalize(Some(&input), some_evening());

            prop_assert_eq!(time.hour_minute(), (hour, minute));

            let rendered = time.to_string();
            prop_assert_eq!(rendered.len(), 8);
            prop_assert!(rendered.ends_with(" AM") || rendered.ends_with(" PM"));
            prop_assert_eq!(&rendered[2..3], ":");
            prop_assert!(rendered[..2].chars().all(|c| c.is_ascii_digit()));
            prop_assert!(rendered[3..5].chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn clock_capture_matches_its_own_minute(now in arb::<NaiveDateTime>()) {
            let time = ReminderTime::normalize(None, now);

            prop_assert_eq!(time.hour_minute(), (now.hour(), now.minute()));
        }
    }
}
