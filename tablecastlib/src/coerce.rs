//! Value coercion: turn any supported value into cell content.
//!
//! Coercion is a pure function of the value, the target format and the
//! render options. The rules, in order:
//!
//! 1. content is used as is
//! 2. primitives (bool, numbers, strings) become text, with newlines turned
//!    into `<br>` for HTML and a single space for CSV
//! 3. null becomes empty text (`&nbsp;` in HTML, `""` in CSV)
//! 4. datetimes: human form in HTML, ISO 8601 in CSV
//! 5. dates: human form in HTML, `YYYY-MM-DD` in CSV
//! 6. durations: `[D days, ]H:MM:SS` in both
//! 7. times of day: the configured time format in both
//! 8. lists become a `CellContentList` of their elements
//! 9. money uses its display form
//!
//! Anything else is an `UnsupportedValueType` error.

use tracing::debug;

use crate::content::{CellContent, CellContentList, Render, StringContent};
use crate::error::TableError;
use crate::options::{Format, RenderOptions};
use crate::value::{format_duration, primitive_text, Value};
use crate::Result;

/// Coerce `value` for `format` with default render options
pub fn coerce(value: &Value, format: Format) -> Result<CellContent> {
    coerce_with(value, format, &RenderOptions::default())
}

/// Coerce `value` for `format`
pub fn coerce_with(value: &Value, format: Format, options: &RenderOptions) -> Result<CellContent> {
    let text = match value {
        Value::Content(content) => return Ok(content.as_ref().clone()),
        Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) | Value::Str(_) => {
            primitive_text(value)
                .unwrap_or_default()
                .replace('\n', format.line_break())
        }
        Value::Null => String::new(),
        Value::DateTime(dt) => match format {
            Format::Html => options.format_datetime(dt),
            Format::Csv => options.iso_datetime(dt),
        },
        Value::Date(date) => match format {
            Format::Html => options.format_date(date),
            Format::Csv => options.iso_date(date),
        },
        Value::Duration(delta) => format_duration(delta),
        Value::Time(time) => options.format_time(time),
        Value::List(items) => {
            items.iter().try_for_each(check)?;
            return Ok(CellContent::List(CellContentList::from_checked(
                items.clone(),
            )));
        }
        Value::Money(money) => money.to_string(),
        Value::Foreign { .. } => {
            check(value)?;
            String::new()
        }
    };
    Ok(CellContent::Text(StringContent::new(text)))
}

/// Check that `value` can be coerced, without building anything.
///
/// Containers call this when they are built so unsupported values surface
/// at construction, not halfway through a render.
pub fn check(value: &Value) -> Result<()> {
    match value {
        Value::Foreign { type_name } => {
            debug!(type_name = %type_name, "rejecting value of unsupported type");
            Err(TableError::unsupported(type_name.clone()))
        }
        Value::List(items) => items.iter().try_for_each(check),
        _ => Ok(()),
    }
}

/// Render a value that already passed `check`.
pub(crate) fn render_checked(value: &Value, format: Format, options: &RenderOptions) -> String {
    match coerce_with(value, format, options) {
        Ok(content) => content.render_with(format, options),
        // Checked on the way in.
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{InHref, Tooltip};
    use crate::money::Money;
    use chrono::{NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn html(value: impl Into<Value>) -> String {
        coerce(&value.into(), Format::Html).unwrap().render_html()
    }

    fn csv(value: impl Into<Value>) -> String {
        coerce(&value.into(), Format::Csv).unwrap().render_csv()
    }

    #[test]
    fn test_content_passes_through() {
        let tooltip = Tooltip::new("a", "b");
        let content = coerce(&Value::from(tooltip.clone()), Format::Html).unwrap();
        assert_eq!(content, CellContent::Tooltip(tooltip));
    }

    #[test]
    fn test_newlines_by_format() {
        assert_eq!(html("a\nb\nc"), "a<br>b<br>c");
        assert_eq!(csv("a\nb\nc"), "a b c");
    }

    #[test]
    fn test_zero_and_false_are_not_blank() {
        assert_eq!(html(0), "0");
        assert_eq!(csv(0), "0");
        assert_eq!(html(false), "False");
        assert_eq!(csv(false), "False");
    }

    #[test]
    fn test_null_and_empty() {
        assert_eq!(html(Value::Null), "&nbsp;");
        assert_eq!(csv(Value::Null), "");
        assert_eq!(html(""), "&nbsp;");
        assert_eq!(csv(""), "");
    }

    #[test]
    fn test_datetime_forms() {
        let dt = Utc.with_ymd_and_hms(2021, 3, 9, 8, 5, 0).unwrap();
        assert_eq!(html(dt), "Mar 9, 2021 8:05 AM");
        assert_eq!(csv(dt), "2021-03-09T08:05:00+00:00");
    }

    #[test]
    fn test_date_forms() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 9).unwrap();
        assert_eq!(html(date), "Mar 9, 2021");
        assert_eq!(csv(date), "2021-03-09");
    }

    #[test]
    fn test_duration_same_in_both() {
        let delta = TimeDelta::seconds(90) + TimeDelta::microseconds(12);
        assert_eq!(html(delta), "0:01:30");
        assert_eq!(csv(delta), "0:01:30");
    }

    #[test]
    fn test_time_of_day() {
        let time = NaiveTime::from_hms_opt(17, 45, 0).unwrap();
        assert_eq!(html(time), "5:45 PM");
        assert_eq!(csv(time), "5:45 PM");
    }

    #[test]
    fn test_money() {
        let money = Money::usd(Decimal::new(1999, 2));
        assert_eq!(html(money.clone()), "$19.99");
        assert_eq!(csv(money), "$19.99");
    }

    #[test]
    fn test_list_becomes_content_list() {
        let value = Value::from(vec![Value::from("x"), Value::from(InHref::new("y", "/y").unwrap())]);
        let content = coerce(&value, Format::Html).unwrap();
        assert_eq!(content.kind(), "CellContentList");
        assert_eq!(content.render_html(), "x<a href=\"/y\">y</a>");
        assert_eq!(content.render_csv(), "xy");
    }

    #[test]
    fn test_foreign_rejected_with_type_name() {
        struct OpenFile;
        let err = coerce(&Value::foreign(&OpenFile), Format::Html).unwrap_err();
        match err {
            TableError::UnsupportedValueType { type_name } => {
                assert!(type_name.ends_with("OpenFile"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_foreign_inside_list_rejected() {
        let value = Value::List(vec![Value::from(1), Value::foreign_named("object")]);
        assert!(coerce(&value, Format::Csv).is_err());
        assert!(check(&value).is_err());
    }

    #[test]
    fn test_deterministic() {
        let value = Value::from(vec![Value::from("a\nb"), Value::from(3.5)]);
        let first = coerce(&value, Format::Html).unwrap().render_html();
        let second = coerce(&value, Format::Html).unwrap().render_html();
        assert_eq!(first, second);
    }
}
