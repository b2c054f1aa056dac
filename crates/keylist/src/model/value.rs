//! Dynamic member values.
//!
//! A [`Value`] is what an element hands back when asked for one of its named
//! members. The concrete member type is only known once a caller picks a
//! member name at runtime, so values carry their own [`ValueKind`] and the
//! element decides which [`Comparator`](super::Comparator) fits each kind.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Runtime kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text.
    String,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Date and time without a time zone.
    DateTime,
    /// Calendar date.
    Date,
    /// Signed duration.
    Duration,
}

impl ValueKind {
    /// Human readable kind name.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::DateTime => "datetime",
            ValueKind::Date => "date",
            ValueKind::Duration => "duration",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The current value of a named member.
///
/// # Example
///
/// ```
/// use keylist::{Value, ValueKind};
///
/// let value = Value::from("Bob");
/// assert_eq!(value.kind(), Some(ValueKind::String));
/// assert_eq!(value.as_str(), Some("Bob"));
///
/// let missing = Value::from(None::<i64>);
/// assert!(missing.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value (an unset optional member).
    #[default]
    None,
    /// Text.
    String(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Date and time without a time zone.
    DateTime(NaiveDateTime),
    /// Calendar date.
    Date(NaiveDate),
    /// Signed duration.
    Duration(TimeDelta),
}

impl Value {
    /// The runtime kind, or `None` for [`Value::None`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::None => None,
            Value::String(_) => Some(ValueKind::String),
            Value::Int(_) => Some(ValueKind::Int),
            Value::UInt(_) => Some(ValueKind::UInt),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::DateTime(_) => Some(ValueKind::DateTime),
            Value::Date(_) => Some(ValueKind::Date),
            Value::Duration(_) => Some(ValueKind::Duration),
        }
    }

    /// Returns `true` if this is `Value::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this contains some value.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as a signed integer.
    ///
    /// Unsigned values that fit are converted.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Attempts to get the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("<none>"),
            Value::String(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::Duration(d) => write!(f, "{d}"),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::UInt(u64::from(n))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::UInt(n as u64)
    }
}

impl From<isize> for Value {
    fn from(n: isize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<TimeDelta> for Value {
    fn from(d: TimeDelta) -> Self {
        Value::Duration(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(Value::from("a").kind(), Some(ValueKind::String));
        assert_eq!(Value::from(3i32).kind(), Some(ValueKind::Int));
        assert_eq!(Value::from(3u8).kind(), Some(ValueKind::UInt));
        assert_eq!(Value::from(1.5f32).kind(), Some(ValueKind::Float));
        assert_eq!(Value::from(true).kind(), Some(ValueKind::Bool));
        assert_eq!(Value::None.kind(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(Some(4u32)), Value::UInt(4));
        assert_eq!(Value::from(None::<String>), Value::None);
    }

    #[test]
    fn test_numeric_accessors() {
        assert_eq!(Value::UInt(7).as_int(), Some(7));
        assert_eq!(Value::UInt(u64::MAX).as_int(), None);
        assert_eq!(Value::Int(-2).as_f64(), Some(-2.0));
    }

    #[test]
    fn test_chrono_values() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let value = Value::from(date);
        assert_eq!(value.kind(), Some(ValueKind::Date));
        assert_eq!(value.as_date(), Some(date));
        assert_eq!(value.to_string(), "2024-02-29");
    }
}
