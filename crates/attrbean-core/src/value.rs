//! Raw property values.
//!
//! A [`Value`] is what a bean accessor returns before it is formatted into an
//! attribute string. The variants mirror the kinds the formatter dispatches
//! on, so arrays and non-array sequences stay distinguishable even though
//! they currently format the same way.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Runtime representation of a property value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value; never produces an attribute.
    #[default]
    Null,
    /// Text, passed through unchanged.
    Str(String),
    /// Boolean, resolved through caller-supplied substitutes.
    Bool(bool),
    /// Fixed-size array of any element kind, including nested arrays.
    Array(Vec<Value>),
    /// Any other sequence (lists, sets, iterators collected eagerly).
    Seq(Vec<Value>),
    /// Key-value container. Entry order is preserved.
    Map(Vec<(Value, Value)>),
    /// Signed integer of any width.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// 32-bit floating point, formatted with its own shortest digits.
    Float32(f32),
    /// Single character.
    Char(char),
    /// An arbitrary object, carried as its default textual form.
    Opaque(String),
}

impl Value {
    /// Wrap any displayable object as an opaque value.
    ///
    /// # Example
    ///
    /// ```
    /// use attrbean_core::Value;
    ///
    /// let value = Value::opaque(std::net::Ipv4Addr::LOCALHOST);
    /// assert_eq!(value, Value::Opaque("127.0.0.1".to_owned()));
    /// ```
    pub fn opaque(object: impl fmt::Display) -> Self {
        Self::Opaque(object.to_string())
    }

    /// Build an array value from any iterator of convertible elements.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a sequence value from any iterator of convertible elements.
    pub fn seq<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }

    /// Build a map value from key-value pairs.
    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the text if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the entries if this is a `Map`.
    #[must_use]
    pub fn as_entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Default textual form of a value.
///
/// This is the fallback used by the formatter for everything that is not
/// text, a boolean or a sequence. Sequences render as `[a, b]` and maps as
/// `{k=v, k2=v2}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Str(s) | Self::Opaque(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) | Self::Seq(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&decimal_text(*v, *v)),
            Self::Float32(v) => f.write_str(&decimal_text(*v, f64::from(*v))),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Decimal text for a floating-point number.
///
/// Uses the shortest digits that round-trip for the number's own width.
/// Integral values keep a trailing `.0`; magnitudes outside `[1e-3, 1e7)`
/// switch to `d.dddE±n` notation.
fn decimal_text<T: fmt::Display + fmt::LowerExp>(value: T, magnitude: f64) -> String {
    if magnitude.is_nan() {
        return "NaN".to_owned();
    }
    if magnitude.is_infinite() {
        return if magnitude > 0.0 {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }

    let abs = magnitude.abs();
    if abs == 0.0 || (1e-3..1e7).contains(&abs) {
        let text = value.to_string();
        if text.contains('.') {
            text
        } else {
            format!("{text}.0")
        }
    } else {
        let text = format!("{value:e}");
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        if mantissa.contains('.') {
            format!("{mantissa}E{exponent}")
        } else {
            format!("{mantissa}.0E{exponent}")
        }
    }
}

macro_rules! int_conversions {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

int_conversions!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Opaque(v.to_string()), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Opaque(v.to_string()), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float32(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::seq(v)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::array(v)
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Self::array(v.iter().cloned())
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(v: HashMap<K, V, S>) -> Self {
        Self::map(v)
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::map(v)
    }
}
