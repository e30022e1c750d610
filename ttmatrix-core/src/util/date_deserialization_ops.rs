use chrono::{NaiveDate, NaiveDateTime, ParseResult};
use serde::de::Error;
use serde::Deserialize;
use serde::Deserializer;

pub const APP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const APP_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn naive_date_from_str(date_str: &str) -> ParseResult<NaiveDate> {
    chrono::NaiveDate::parse_from_str(date_str, APP_DATE_FORMAT)
}

pub fn naive_datetime_from_str(datetime_str: &str) -> ParseResult<NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(datetime_str, APP_DATETIME_FORMAT)
}

/// parses a service time of day "HH:MM:SS" into seconds after service-day midnight.
/// hours may exceed 23 for trips that run past midnight.
pub fn service_time_from_str(time_str: &str) -> Result<u32, String> {
    let parts = time_str
        .trim()
        .split(':')
        .map(|p| p.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid service time '{time_str}': {e}"))?;
    match parts[..] {
        [h, m, s] if m < 60 && s < 60 => h
            .checked_mul(3600)
            .and_then(|hs| hs.checked_add(m * 60 + s))
            .ok_or_else(|| format!("service time '{time_str}' overflows")),
        _ => Err(format!(
            "invalid service time '{time_str}', expected HH:MM:SS"
        )),
    }
}

pub fn deserialize_naive_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let date_str: String = String::deserialize(deserializer)?;
    naive_date_from_str(&date_str)
        .map_err(|e| D::Error::custom(format!("Invalid datetime format: {e}")))
}

pub fn deserialize_naive_dates<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let date_strs: Vec<String> = Vec::deserialize(deserializer)?;
    date_strs
        .iter()
        .map(|s| {
            naive_date_from_str(s)
                .map_err(|e| D::Error::custom(format!("Invalid date format for '{s}': {e}")))
        })
        .collect()
}

pub fn deserialize_optional_service_time<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let time_str: Option<String> = Option::deserialize(deserializer)?;
    match time_str {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => service_time_from_str(&s).map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod test {
    use super::service_time_from_str;

    #[test]
    fn test_service_time_parsing() {
        let cases = vec![
            ("00:00:00", Ok(0)),
            ("08:15:30", Ok(8 * 3600 + 15 * 60 + 30)),
            ("25:10:00", Ok(25 * 3600 + 600)),
        ];
        for (input, expected) in cases {
            assert_eq!(service_time_from_str(input), expected, "{input}");
        }
    }

    #[test]
    fn test_service_time_rejects_malformed() {
        for input in ["8:15", "08:61:00", "aa:bb:cc", ""] {
            assert!(service_time_from_str(input).is_err(), "{input} should fail");
        }
    }
}
