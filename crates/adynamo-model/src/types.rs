//! Shared wire types used across operation inputs and outputs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Comparison operator for `Condition` filters.
///
/// Used with the `ScanFilter`, `KeyConditions`, and `Expected` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Equal to.
    #[serde(rename = "EQ")]
    Eq,
    /// Not equal to.
    #[serde(rename = "NE")]
    Ne,
    /// Less than or equal to.
    #[serde(rename = "LE")]
    Le,
    /// Less than.
    #[serde(rename = "LT")]
    Lt,
    /// Greater than or equal to.
    #[serde(rename = "GE")]
    Ge,
    /// Greater than.
    #[serde(rename = "GT")]
    Gt,
}

impl ComparisonOperator {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Le => "LE",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Gt => "GT",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determines the attributes returned after a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnValue {
    /// Return nothing.
    #[serde(rename = "NONE")]
    None,
    /// Return the item content as it appeared before the operation.
    #[serde(rename = "ALL_OLD")]
    AllOld,
    /// Return the item content as it appears after the operation.
    #[serde(rename = "ALL_NEW")]
    AllNew,
}

/// Level of detail about consumed throughput to include in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnConsumedCapacity {
    /// Do not report consumed capacity.
    #[serde(rename = "NONE")]
    None,
    /// Report the total capacity consumed by the operation.
    #[serde(rename = "TOTAL")]
    Total,
}

/// Action to perform on an attribute during an `UpdateItem` operation.
///
/// Used with the `AttributeUpdates` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttributeAction {
    /// Set the attribute value, replacing any existing value.
    #[default]
    #[serde(rename = "PUT")]
    Put,
    /// Add to a number attribute, or insert members into a set.
    #[serde(rename = "ADD")]
    Add,
    /// Delete the attribute, or remove members from a set.
    #[serde(rename = "DELETE")]
    Delete,
}

// ---------------------------------------------------------------------------
// Structs - Conditions
// ---------------------------------------------------------------------------

/// A comparison against one attribute, for `KeyConditions` and `ScanFilter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Condition {
    /// The comparison operator.
    pub comparison_operator: ComparisonOperator,
    /// The attribute values to compare against.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_value_list: Vec<AttributeValue>,
}

/// Expected attribute state for the `Expected` parameter (conditional writes).
///
/// Exactly one form is used per entry: `exists: false` requires the
/// attribute to be absent; `value` requires it to equal the given value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExpectedAttributeValue {
    /// The value the attribute must currently hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// Whether the attribute must exist (`true`) or not exist (`false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

impl ExpectedAttributeValue {
    /// Expectation that the attribute does not exist yet.
    #[must_use]
    pub fn absent() -> Self {
        Self {
            value: None,
            exists: Some(false),
        }
    }

    /// Expectation that the attribute currently equals `value`.
    #[must_use]
    pub fn equals(value: AttributeValue) -> Self {
        Self {
            value: Some(value),
            exists: None,
        }
    }
}

/// An attribute value update for the `AttributeUpdates` parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeValueUpdate {
    /// The new value for the attribute (or the delta, for `ADD`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
    /// The action to perform on the attribute.
    pub action: AttributeAction,
}

// ---------------------------------------------------------------------------
// Structs - Consumed Capacity
// ---------------------------------------------------------------------------

/// Capacity consumed by an operation.
///
/// Returned when `ReturnConsumedCapacity` is set to `TOTAL`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConsumedCapacity {
    /// The name of the table that was affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// The total capacity units consumed by the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_units: Option<f64>,
}

// ---------------------------------------------------------------------------
// Structs - Batch Operations
// ---------------------------------------------------------------------------

/// The keys to retrieve from a single table in a `BatchGetItem` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysAndAttributes {
    /// The primary keys of the items to retrieve.
    pub keys: Vec<HashMap<String, AttributeValue>>,
    /// The attribute names to retrieve. Empty means all attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes_to_get: Vec<String>,
    /// Whether to use a consistent read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistent_read: Option<bool>,
}

/// A single write request within a `BatchWriteItem` operation.
///
/// Exactly one of `put_request` or `delete_request` must be specified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WriteRequest {
    /// A request to put an item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_request: Option<PutRequest>,
    /// A request to delete an item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_request: Option<DeleteRequest>,
}

impl WriteRequest {
    /// A write request that puts `item`.
    #[must_use]
    pub fn put(item: HashMap<String, AttributeValue>) -> Self {
        Self {
            put_request: Some(PutRequest { item }),
            delete_request: None,
        }
    }

    /// A write request that deletes the item identified by `key`.
    #[must_use]
    pub fn delete(key: HashMap<String, AttributeValue>) -> Self {
        Self {
            put_request: None,
            delete_request: Some(DeleteRequest { key }),
        }
    }
}

/// A request to put an item within a `BatchWriteItem` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRequest {
    /// The item attributes to put.
    pub item: HashMap<String, AttributeValue>,
}

/// A request to delete an item within a `BatchWriteItem` operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteRequest {
    /// The primary key of the item to delete.
    pub key: HashMap<String, AttributeValue>,
}

// ---------------------------------------------------------------------------
// Type aliases for common item shapes
// ---------------------------------------------------------------------------

/// A wire item represented as a map of attribute names to values.
pub type WireItem = HashMap<String, AttributeValue>;

/// A wire key represented as a map of key attribute names to values.
pub type WireKey = HashMap<String, AttributeValue>;
