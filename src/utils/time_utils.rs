use chrono::{TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const MS_IN_30_D: i64 = Self::MS_IN_D * 30;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

/// Format an epoch-millisecond timestamp as a date string for exports.
/// Falls back to the raw number if the timestamp is out of chrono's range.
pub fn epoch_ms_to_date(epoch_ms: i64) -> String {
    if let chrono::LocalResult::Single(datetime) = Utc.timestamp_millis_opt(epoch_ms) {
        datetime.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
    } else {
        epoch_ms.to_string()
    }
}

/// How many seconds ago an epoch-millisecond timestamp was. Used for cache
/// staleness checks; a future timestamp yields a negative age.
pub fn how_many_seconds_ago(epoch_ms: i64) -> i64 {
    (Utc::now().timestamp_millis() - epoch_ms) / TimeUtils::MS_IN_S
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_ms_to_date() {
        // 2021-01-01T00:00:00Z
        assert_eq!(epoch_ms_to_date(1_609_459_200_000), "2021-01-01");
    }
}
