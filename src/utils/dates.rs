use chrono::{Duration, NaiveDate, NaiveDateTime};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Day 0 of the spreadsheet serial date system (1899-12-30)
pub fn serial_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a spreadsheet serial day count to a calendar timestamp
///
/// Fractional days carry the time of day. The result is rounded to the
/// nearest second so that hourly readings stored as fractions land exactly
/// on the hour.
///
/// # Examples
/// ```
/// use ncs_dashboard::utils::serial_to_datetime;
///
/// let ts = serial_to_datetime(44000.0).unwrap();
/// assert_eq!(ts.to_string(), "2020-06-18 00:00:00");
/// ```
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }

    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    serial_epoch().checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Convert a calendar timestamp back to a spreadsheet serial day count
pub fn datetime_to_serial(timestamp: NaiveDateTime) -> f64 {
    let elapsed = timestamp.signed_duration_since(serial_epoch());
    elapsed.num_seconds() as f64 / SECONDS_PER_DAY
}
