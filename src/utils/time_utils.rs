use chrono::{TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const S_IN_MIN: i64 = 60;
    pub const S_IN_15_MIN: i64 = Self::S_IN_MIN * 15;
    pub const S_IN_30_MIN: i64 = Self::S_IN_MIN * 30;
    pub const S_IN_H: i64 = Self::S_IN_MIN * 60;
    pub const S_IN_4_H: i64 = Self::S_IN_H * 4;
    pub const S_IN_D: i64 = Self::S_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
}

/// Candle times are epoch seconds. Out-of-range values render as their raw number.
pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    match Utc.timestamp_opt(epoch_sec, 0) {
        chrono::LocalResult::Single(datetime) => {
            datetime.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
        }
        _ => epoch_sec.to_string(),
    }
}

/// "first .. last" span of a candle series, for log lines
pub fn describe_span(first_sec: i64, last_sec: i64) -> String {
    format!(
        "{} .. {}",
        epoch_sec_to_utc(first_sec),
        epoch_sec_to_utc(last_sec)
    )
}
