use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Given a "modified" Julian date (day count since 1/1/1970, with day 1 being
/// the epoch itself) and a count of milliseconds since midnight on that date,
/// return an appropriate DateTime.
pub(crate) fn get_datetime(
    modified_julian_date: u32,
    past_midnight: Duration,
) -> Option<DateTime<Utc>> {
    let count_start = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let date = count_start + Duration::days(modified_julian_date as i64 - 1);
    let time = NaiveTime::from_num_seconds_from_midnight_opt(0, 0)? + past_midnight;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}

/// The NEXRAD modified-Julian-day timestamp as milliseconds since the UNIX
/// epoch.
pub(crate) fn nexrad_timestamp_millis(modified_julian_date: u32, milliseconds: u32) -> i64 {
    (modified_julian_date as i64 - 1) * 86_400_000 + milliseconds as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mjd_conversion_matches_epoch_convention() {
        // Day 1 is the epoch itself, so day 15000 is 14999 days past it.
        let datetime = get_datetime(15000, Duration::milliseconds(3_600_000)).unwrap();
        let expected = DateTime::parse_from_rfc3339("2011-01-25T01:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(datetime, expected);
        assert_eq!(
            nexrad_timestamp_millis(15000, 3_600_000),
            expected.timestamp_millis()
        );
    }

    #[test]
    fn day_one_is_the_epoch() {
        assert_eq!(nexrad_timestamp_millis(1, 0), 0);
    }
}
