//! Per-table key schema declaration and validation.
//!
//! A table's key shape is fixed when the schema is constructed: a typed
//! hash key and an optional typed range key. [`TableSchema::extract_keys`]
//! is the single gate every read and write operation uses to separate item
//! identity from payload.

use adynamo_model::types::WireKey;

use crate::codec::{self, Item, Value};
use crate::error::{Error, Result};

/// The scalar type a key attribute must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Integer key.
    Int,
    /// String key.
    Str,
}

impl KeyType {
    fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Int, Value::Int(_)) | (Self::Str, Value::Str(_))
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "string",
        }
    }
}

/// The key attributes popped out of an item, plus whatever remains.
#[derive(Debug, Clone)]
pub struct ExtractedKeys {
    /// The hash key value.
    pub hash: Value,
    /// The range key value, when the schema declares one.
    pub range: Option<Value>,
    /// The non-key attributes left over.
    pub rest: Item,
}

/// Declares a table's hash key and optional range key.
#[derive(Debug, Clone)]
pub struct TableSchema {
    hash_name: String,
    hash_type: KeyType,
    range: Option<(String, KeyType)>,
}

impl TableSchema {
    /// A schema with a hash key only.
    #[must_use]
    pub fn new(hash_name: impl Into<String>, hash_type: KeyType) -> Self {
        Self {
            hash_name: hash_name.into(),
            hash_type,
            range: None,
        }
    }

    /// Adds a range key to the schema.
    #[must_use]
    pub fn with_range_key(mut self, name: impl Into<String>, range_type: KeyType) -> Self {
        self.range = Some((name.into(), range_type));
        self
    }

    /// Checks the schema for structural problems: empty attribute names, or
    /// a range key shadowing the hash key.
    pub fn validate(&self) -> Result<()> {
        if self.hash_name.is_empty() {
            return Err(Error::Schema("hash key name is empty".to_owned()));
        }
        if let Some((name, _)) = &self.range {
            if name.is_empty() {
                return Err(Error::Schema("range key name is empty".to_owned()));
            }
            if *name == self.hash_name {
                return Err(Error::Schema(format!(
                    "range key `{name}` duplicates the hash key"
                )));
            }
        }
        Ok(())
    }

    /// The name of the hash key attribute.
    #[must_use]
    pub fn hash_key_name(&self) -> &str {
        &self.hash_name
    }

    /// The name of the range key attribute, if one is declared.
    #[must_use]
    pub fn range_key_name(&self) -> Option<&str> {
        self.range.as_ref().map(|(name, _)| name.as_str())
    }

    /// Pops the declared key attributes out of `attributes`.
    ///
    /// Fails with [`Error::MissingKey`] when a declared key attribute is
    /// absent and [`Error::TypeMismatch`] when its native type disagrees
    /// with the schema. Everything else is returned untouched in `rest`.
    pub fn extract_keys(&self, mut attributes: Item) -> Result<ExtractedKeys> {
        let hash = Self::pop_key(&mut attributes, &self.hash_name, self.hash_type)?;
        let range = match &self.range {
            Some((name, range_type)) => {
                Some(Self::pop_key(&mut attributes, name, *range_type)?)
            }
            None => None,
        };
        Ok(ExtractedKeys {
            hash,
            range,
            rest: attributes,
        })
    }

    fn pop_key(attributes: &mut Item, name: &str, key_type: KeyType) -> Result<Value> {
        let value = attributes
            .remove(name)
            .ok_or_else(|| Error::MissingKey(name.to_owned()))?;
        if !key_type.matches(&value) {
            return Err(Error::TypeMismatch {
                attr: name.to_owned(),
                expected: key_type.as_str(),
                actual: value.kind(),
            });
        }
        Ok(value)
    }

    /// Packs key values into the wire key map.
    ///
    /// Both values are type-checked against the schema; a composite table
    /// requires its range value and a hash-only table rejects one.
    pub fn build_key(&self, hash: &Value, range: Option<&Value>) -> Result<WireKey> {
        if !self.hash_type.matches(hash) {
            return Err(Error::TypeMismatch {
                attr: self.hash_name.clone(),
                expected: self.hash_type.as_str(),
                actual: hash.kind(),
            });
        }
        let mut key = WireKey::new();
        key.insert(self.hash_name.clone(), codec::pack(hash)?);

        match (&self.range, range) {
            (Some((name, range_type)), Some(value)) => {
                if !range_type.matches(value) {
                    return Err(Error::TypeMismatch {
                        attr: name.clone(),
                        expected: range_type.as_str(),
                        actual: value.kind(),
                    });
                }
                key.insert(name.clone(), codec::pack(value)?);
            }
            (Some((name, _)), None) => return Err(Error::MissingKey(name.clone())),
            (None, Some(_)) => {
                return Err(Error::Schema(
                    "table declares no range key but one was supplied".to_owned(),
                ));
            }
            (None, None) => {}
        }
        Ok(key)
    }
}
