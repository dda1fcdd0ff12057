//! Render options: target format and the shared date/time conventions.
//!
//! Rendering is a pure function of the table and these options. Nothing is
//! read from the environment, so two renders with equal options produce
//! byte-identical output.

use std::fmt::Write;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Output format a value is coerced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Trusted HTML markup
    Html,
    /// A single-line CSV field
    Csv,
}

impl Format {
    /// What a newline inside a primitive value turns into
    pub fn line_break(&self) -> &'static str {
        match self {
            Format::Html => "<br>",
            Format::Csv => " ",
        }
    }
}

impl FromStr for Format {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Format::Html),
            "csv" => Ok(Format::Csv),
            _ => Err(TableError::InvalidOptions(format!(
                "unknown format '{}', expected html or csv",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Html => write!(f, "html"),
            Format::Csv => write!(f, "csv"),
        }
    }
}

/// Date and time conventions shared by every table of an application.
///
/// The strftime patterns only apply to HTML. CSV always gets ISO forms
/// (RFC 3339 datetimes in `timezone`, `YYYY-MM-DD` dates) so exports sort
/// and parse cleanly; time-of-day values use `time_format` in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Zone datetimes are converted to before formatting
    #[serde(with = "tz_name")]
    pub timezone: Tz,
    /// strftime pattern for datetimes in HTML
    pub datetime_format: String,
    /// strftime pattern for dates in HTML
    pub date_format: String,
    /// strftime pattern for times of day
    pub time_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            datetime_format: "%b %-d, %Y %-I:%M %p".to_string(),
            date_format: "%b %-d, %Y".to_string(),
            time_format: "%-I:%M %p".to_string(),
        }
    }
}

impl RenderOptions {
    /// Create options with the default conventions
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the display timezone
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Builder: set the HTML datetime pattern
    pub fn with_datetime_format(mut self, pattern: impl Into<String>) -> Self {
        self.datetime_format = pattern.into();
        self
    }

    /// Builder: set the HTML date pattern
    pub fn with_date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Builder: set the time-of-day pattern
    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = pattern.into();
        self
    }

    /// Parse a timezone name such as `America/New_York`.
    pub fn parse_timezone(name: &str) -> Result<Tz, TableError> {
        name.parse::<Tz>()
            .map_err(|e| TableError::InvalidOptions(format!("unknown timezone '{}': {}", name, e)))
    }

    /// Check every strftime pattern up front.
    ///
    /// A bad pattern would otherwise only show up as an empty field at
    /// render time.
    pub fn validate(&self) -> Result<(), TableError> {
        for (name, pattern) in [
            ("datetime_format", &self.datetime_format),
            ("date_format", &self.date_format),
            ("time_format", &self.time_format),
        ] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(TableError::InvalidOptions(format!(
                    "{} '{}' is not a valid strftime pattern",
                    name, pattern
                )));
            }
        }
        Ok(())
    }

    /// Human form of a datetime, in the configured zone
    pub fn format_datetime(&self, dt: &DateTime<Utc>) -> String {
        let local = dt.with_timezone(&self.timezone);
        strftime(local.format(&self.datetime_format))
    }

    /// ISO 8601 form of a datetime, in the configured zone
    pub fn iso_datetime(&self, dt: &DateTime<Utc>) -> String {
        dt.with_timezone(&self.timezone)
            .to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    /// Human form of a date
    pub fn format_date(&self, date: &NaiveDate) -> String {
        strftime(date.format(&self.date_format))
    }

    /// ISO 8601 form of a date
    pub fn iso_date(&self, date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Formatted time of day
    pub fn format_time(&self, time: &NaiveTime) -> String {
        strftime(time.format(&self.time_format))
    }
}

// `to_string()` on a chrono DelayedFormat panics on a bad pattern;
// writing it ourselves turns that into an empty field.
fn strftime(formatted: impl std::fmt::Display) -> String {
    let mut out = String::new();
    if write!(out, "{}", formatted).is_err() {
        out.clear();
    }
    out
}

mod tz_name {
    use chrono_tz::Tz;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Tz>()
            .map_err(|e| D::Error::custom(format!("unknown timezone '{}': {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_dt() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 1, 5, 15, 4, 0).unwrap()
    }

    #[test]
    fn test_format_line_breaks() {
        assert_eq!(Format::Html.line_break(), "<br>");
        assert_eq!(Format::Csv.line_break(), " ");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("HTML".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert!("xlsx".parse::<Format>().is_err());
    }

    #[test]
    fn test_default_datetime_formats() {
        let options = RenderOptions::default();
        assert_eq!(options.format_datetime(&sample_dt()), "Jan 5, 2021 3:04 PM");
        assert_eq!(options.iso_datetime(&sample_dt()), "2021-01-05T15:04:00+00:00");
    }

    #[test]
    fn test_timezone_shifts_both_forms() {
        let options = RenderOptions::new().with_timezone(chrono_tz::America::New_York);
        assert_eq!(options.format_datetime(&sample_dt()), "Jan 5, 2021 10:04 AM");
        assert_eq!(options.iso_datetime(&sample_dt()), "2021-01-05T10:04:00-05:00");
    }

    #[test]
    fn test_date_and_time_forms() {
        let options = RenderOptions::default();
        let date = NaiveDate::from_ymd_opt(2020, 12, 25).unwrap();
        assert_eq!(options.format_date(&date), "Dec 25, 2020");
        assert_eq!(options.iso_date(&date), "2020-12-25");
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(options.format_time(&time), "9:30 AM");
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        assert!(RenderOptions::default().validate().is_ok());
        let options = RenderOptions::new().with_date_format("%Q");
        assert!(matches!(
            options.validate(),
            Err(TableError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            RenderOptions::parse_timezone("Europe/Paris").unwrap(),
            chrono_tz::Europe::Paris
        );
        assert!(RenderOptions::parse_timezone("Mars/Olympus").is_err());
    }
}
