//! Marshaling between native values and the tagged wire representation.
//!
//! Native values are integers, strings, and non-empty homogeneous sets of
//! either. The wire side is [`AttributeValue`], a single-key tagged JSON
//! object. Numeric sets use the `NS` tag on both directions.

use std::collections::{BTreeSet, HashMap};

use adynamo_model::AttributeValue;

use crate::error::{Error, Result};

/// A native attribute value.
///
/// Sets are `BTreeSet`s: membership is deduplicated by construction and wire
/// payloads are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A string.
    Str(String),
    /// A non-empty set of integers.
    IntSet(BTreeSet<i64>),
    /// A non-empty set of strings.
    StrSet(BTreeSet<String>),
}

impl Value {
    /// A short name for the value's native type, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::IntSet(_) => "int set",
            Self::StrSet(_) => "string set",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<BTreeSet<i64>> for Value {
    fn from(v: BTreeSet<i64>) -> Self {
        Self::IntSet(v)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(v: BTreeSet<String>) -> Self {
        Self::StrSet(v)
    }
}

/// A native item: a map from attribute name to [`Value`].
pub type Item = HashMap<String, Value>;

/// Build an [`Item`] from `name => value` pairs.
///
/// # Examples
///
/// ```
/// use adynamo_client::item;
///
/// let it = item! { "id" => 7, "name" => "alice" };
/// assert_eq!(it.len(), 2);
/// ```
#[macro_export]
macro_rules! item {
    () => { $crate::codec::Item::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut m = $crate::codec::Item::new();
        $( m.insert($name.to_string(), $crate::codec::Value::from($value)); )+
        m
    }};
}

/// Marshal a native value into its tagged wire form.
///
/// Fails with [`Error::InvalidValue`] on an empty set; the store does not
/// represent empty sets.
pub fn pack(value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Int(n) => Ok(AttributeValue::N(n.to_string())),
        Value::Str(s) => Ok(AttributeValue::S(s.clone())),
        Value::IntSet(set) => {
            if set.is_empty() {
                return Err(Error::InvalidValue(
                    "empty sets are not supported by the store".to_owned(),
                ));
            }
            Ok(AttributeValue::Ns(
                set.iter().map(ToString::to_string).collect(),
            ))
        }
        Value::StrSet(set) => {
            if set.is_empty() {
                return Err(Error::InvalidValue(
                    "empty sets are not supported by the store".to_owned(),
                ));
            }
            Ok(AttributeValue::Ss(set.iter().cloned().collect()))
        }
    }
}

/// Unmarshal a tagged wire value into its native form.
///
/// Fails with [`Error::InvalidValue`] when a number does not parse as an
/// integer or a set arrives empty.
pub fn unpack(value: AttributeValue) -> Result<Value> {
    match value {
        AttributeValue::N(n) => n
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| Error::InvalidValue(format!("`{n}` is not a valid integer"))),
        AttributeValue::S(s) => Ok(Value::Str(s)),
        AttributeValue::Ns(members) => {
            if members.is_empty() {
                return Err(Error::InvalidValue("empty number set".to_owned()));
            }
            members
                .into_iter()
                .map(|n| {
                    n.parse::<i64>()
                        .map_err(|_| Error::InvalidValue(format!("`{n}` is not a valid integer")))
                })
                .collect::<Result<BTreeSet<i64>>>()
                .map(Value::IntSet)
        }
        AttributeValue::Ss(members) => {
            if members.is_empty() {
                return Err(Error::InvalidValue("empty string set".to_owned()));
            }
            Ok(Value::StrSet(members.into_iter().collect()))
        }
    }
}

/// Marshal every attribute of a native item.
pub fn pack_item(item: &Item) -> Result<HashMap<String, AttributeValue>> {
    item.iter()
        .map(|(name, value)| Ok((name.clone(), pack(value)?)))
        .collect()
}

/// Unmarshal every attribute of a wire item.
pub fn unpack_item(wire: HashMap<String, AttributeValue>) -> Result<Item> {
    wire.into_iter()
        .map(|(name, value)| Ok((name, unpack(value)?)))
        .collect()
}
