//! Raw cell values as business code hands them over.
//!
//! `Value` is the finite set of input shapes the table layer accepts. Every
//! supported Rust type converts into it with `From`, so most call sites just
//! write `row.add(42)?` or `Cell::new(date)?`. Anything else has to be
//! wrapped explicitly with [`Value::foreign`], and coercing it fails with
//! `UnsupportedValueType`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::content::{
    CellContent, CellContentList, DisappearingFeedback, Feedback, Img, InHref, Paragraph, Problem,
    Render, SimpleList, StringContent, Tooltip,
};
use crate::money::Money;

/// A value waiting to be coerced into cell content.
///
/// Variant order mirrors coercion precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Content that is already renderable
    Content(Box<CellContent>),
    /// `true` / `false`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer too large for `Int`
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Text; may contain newlines
    Str(String),
    /// Missing value
    Null,
    /// Instant in time, shown in the configured timezone
    DateTime(DateTime<Utc>),
    /// Calendar date
    Date(NaiveDate),
    /// Elapsed time; sub-second precision is never shown
    Duration(TimeDelta),
    /// Wall-clock time of day
    Time(NaiveTime),
    /// Ordered values rendered back to back
    List(Vec<Value>),
    /// Monetary amount
    Money(Money),
    /// A value of a type the table layer cannot render
    Foreign {
        /// Runtime type name reported in the coercion error
        type_name: String,
    },
}

impl Value {
    /// Wrap a value of an unsupported type.
    ///
    /// Only the type name is kept; the value itself is never rendered.
    pub fn foreign<T: ?Sized>(_value: &T) -> Self {
        Value::Foreign {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Wrap an unsupported value known only by name (e.g. a JSON object)
    pub fn foreign_named(type_name: impl Into<String>) -> Self {
        Value::Foreign {
            type_name: type_name.into(),
        }
    }

    /// Check if this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Content(_) => "content",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Null => "null",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Duration(_) => "duration",
            Value::Time(_) => "time",
            Value::List(_) => "list",
            Value::Money(_) => "money",
            Value::Foreign { .. } => "foreign",
        }
    }

    /// Short constructor-like representation for debug output
    pub fn describe(&self) -> String {
        match self {
            Value::Content(content) => format!("{}({:?})", content.kind(), content.render_html()),
            Value::Str(s) => format!("{:?}", s),
            Value::Null => "None".to_string(),
            Value::DateTime(dt) => dt.to_rfc3339(),
            Value::Date(d) => d.to_string(),
            Value::Duration(d) => format_duration(d),
            Value::Time(t) => t.to_string(),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::describe).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Money(m) => m.to_string(),
            Value::Foreign { type_name } => format!("<{}>", type_name),
            primitive => primitive_text(primitive).unwrap_or_default(),
        }
    }
}

/// Text of a primitive scalar, `None` for anything else.
///
/// Booleans read `True`/`False` and whole floats keep one decimal (`3.0`),
/// matching how exports produced by the rest of the stack look.
pub(crate) fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::UInt(u) => Some(u.to_string()),
        Value::Float(f) => Some(format_float(*f)),
        Value::Str(s) => Some(s.clone()),
        _ => None,
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let inf = if f > 0.0 { "inf" } else { "-inf" };
        inf.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// Render a duration as `[D day[s], ]H:MM:SS`.
///
/// Sub-second precision is dropped first. Negative durations borrow whole
/// days, so minus half a second reads `-1 day, 23:59:59`.
pub fn format_duration(delta: &TimeDelta) -> String {
    let mut seconds = delta.num_seconds();
    if delta.subsec_nanos() < 0 {
        seconds -= 1;
    }
    let days = seconds.div_euclid(86_400);
    let rest = seconds.rem_euclid(86_400);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i64)
            }
        })*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map(Value::Int).unwrap_or(Value::UInt(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::from(n as u64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(dt: DateTime<Tz>) -> Self {
        Value::DateTime(dt.with_timezone(&Utc))
    }
}

/// Naive datetimes are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt.and_utc())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Value::Duration(d)
    }
}

impl From<Money> for Value {
    fn from(m: Money) -> Self {
        Value::Money(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<CellContent> for Value {
    fn from(content: CellContent) -> Self {
        Value::Content(Box::new(content))
    }
}

macro_rules! content_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(content: $t) -> Self {
                Value::Content(Box::new(CellContent::from(content)))
            }
        })*
    };
}

content_value!(
    StringContent,
    Paragraph,
    Tooltip,
    Feedback,
    DisappearingFeedback,
    InHref,
    Img,
    CellContentList,
    SimpleList,
    Problem
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_text() {
        assert_eq!(primitive_text(&Value::from(0)).unwrap(), "0");
        assert_eq!(primitive_text(&Value::from(false)).unwrap(), "False");
        assert_eq!(primitive_text(&Value::from(true)).unwrap(), "True");
        assert_eq!(primitive_text(&Value::from(2.5)).unwrap(), "2.5");
        assert_eq!(primitive_text(&Value::from(3.0)).unwrap(), "3.0");
        assert_eq!(primitive_text(&Value::from("")).unwrap(), "");
        assert!(primitive_text(&Value::Null).is_none());
    }

    #[test]
    fn test_large_unsigned_stays_exact() {
        assert_eq!(Value::from(7u64), Value::Int(7));
        assert_eq!(Value::from(u64::MAX), Value::UInt(u64::MAX));
        assert_eq!(
            primitive_text(&Value::from(u64::MAX)).unwrap(),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_option_and_vec() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Str("x".to_string()));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn test_foreign_keeps_type_name() {
        struct FileHandle;
        match Value::foreign(&FileHandle) {
            Value::Foreign { type_name } => assert!(type_name.ends_with("FileHandle")),
            other => panic!("expected foreign, got {:?}", other),
        }
    }

    #[test]
    fn test_format_duration_truncates_micros() {
        let d = TimeDelta::seconds(3725) + TimeDelta::microseconds(999_999);
        assert_eq!(format_duration(&d), "1:02:05");
    }

    #[test]
    fn test_format_duration_days() {
        assert_eq!(format_duration(&TimeDelta::days(1)), "1 day, 0:00:00");
        assert_eq!(
            format_duration(&(TimeDelta::days(2) + TimeDelta::seconds(5))),
            "2 days, 0:00:05"
        );
        assert_eq!(format_duration(&TimeDelta::zero()), "0:00:00");
    }

    #[test]
    fn test_format_duration_negative() {
        assert_eq!(format_duration(&TimeDelta::seconds(-1)), "-1 day, 23:59:59");
        assert_eq!(
            format_duration(&TimeDelta::milliseconds(-500)),
            "-1 day, 23:59:59"
        );
        assert_eq!(format_duration(&TimeDelta::days(-3)), "-3 days, 0:00:00");
    }

    #[test]
    fn test_naive_datetime_is_utc() {
        let naive = NaiveDate::from_ymd_opt(2021, 1, 5)
            .unwrap()
            .and_hms_opt(15, 4, 0)
            .unwrap();
        assert_eq!(Value::from(naive), Value::DateTime(naive.and_utc()));
    }

    #[test]
    fn test_describe() {
        assert_eq!(Value::from("a").describe(), "\"a\"");
        assert_eq!(Value::Null.describe(), "None");
        assert_eq!(Value::from(vec![1, 2]).describe(), "[1, 2]");
    }
}
