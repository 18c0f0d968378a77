//! The per-table operation façade.
//!
//! A [`Table`] composes one [`TableSchema`] with the shared executor and
//! exposes the full operation surface: point reads, conditional writes,
//! attribute updates, optimistic removes, query/scan builders, and
//! single-table batch writes. All marshaling and validation happens
//! synchronously before the executor is awaited; local failures never
//! reach the transport.

use std::collections::HashMap;
use std::sync::Arc;

use adynamo_model::Operation;
use adynamo_model::input::{
    BatchGetItemInput, BatchWriteItemInput, DeleteItemInput, GetItemInput, PutItemInput,
    UpdateItemInput,
};
use adynamo_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, DeleteItemOutput, GetItemOutput, PutItemOutput,
    UpdateItemOutput,
};
use adynamo_model::types::{
    AttributeAction, AttributeValueUpdate, ConsumedCapacity, ExpectedAttributeValue,
    KeysAndAttributes, ReturnConsumedCapacity, ReturnValue, WireItem, WriteRequest,
};

use crate::codec::{self, Item, Value};
use crate::error::{Error, MAX_BATCH_OPERATIONS, Result};
use crate::executor::{RequestExecutor, dispatch};
use crate::query::{QueryBuilder, ScanBuilder};
use crate::schema::TableSchema;

/// Options for point reads.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Use a strongly consistent read.
    pub consistent_read: bool,
    /// Restrict the attributes returned. Empty means all attributes.
    pub attributes_to_get: Vec<String>,
}

/// A handle to one named table, sharing the database's executor.
#[derive(Clone)]
pub struct Table {
    pub(crate) name: String,
    pub(crate) schema: TableSchema,
    pub(crate) executor: Arc<dyn RequestExecutor>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Create a table handle over a validated schema and shared executor.
    pub fn new(
        name: impl Into<String>,
        schema: TableSchema,
        executor: Arc<dyn RequestExecutor>,
    ) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            name: name.into(),
            schema,
            executor,
        })
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table's key schema.
    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    // --- Reads ---

    /// Fetch the item with the given hash key.
    ///
    /// Resolves to `None` when no item matches; absence is not an error.
    pub async fn get(&self, hash: impl Into<Value>) -> Result<Option<Item>> {
        self.get_opts(hash.into(), None, GetOptions::default())
            .await
    }

    /// Fetch the item with the given hash and range key.
    pub async fn get_with_range(
        &self,
        hash: impl Into<Value>,
        range: impl Into<Value>,
    ) -> Result<Option<Item>> {
        self.get_opts(hash.into(), Some(range.into()), GetOptions::default())
            .await
    }

    /// Fetch an item with explicit read options.
    pub async fn get_opts(
        &self,
        hash: Value,
        range: Option<Value>,
        opts: GetOptions,
    ) -> Result<Option<Item>> {
        let input = GetItemInput {
            table_name: self.name.clone(),
            key: self.schema.build_key(&hash, range.as_ref())?,
            attributes_to_get: opts.attributes_to_get,
            consistent_read: opts.consistent_read.then_some(true),
        };
        let output: GetItemOutput = dispatch(&*self.executor, Operation::GetItem, &input).await?;
        output.item.map(codec::unpack_item).transpose()
    }

    /// Fetch several items by key in one call.
    ///
    /// Each spec must contain exactly the declared key attributes; any
    /// extra attribute fails with [`Error::UnsupportedArgument`] before
    /// dispatch. Resolves to the found items in store-reported order.
    pub async fn batch_get(&self, key_specs: Vec<Item>) -> Result<Vec<Item>> {
        let mut keys = Vec::with_capacity(key_specs.len());
        for spec in key_specs {
            let extracted = self.schema.extract_keys(spec)?;
            if let Some(extra) = extracted.rest.keys().next() {
                return Err(Error::UnsupportedArgument(extra.clone()));
            }
            keys.push(
                self.schema
                    .build_key(&extracted.hash, extracted.range.as_ref())?,
            );
        }
        let input = BatchGetItemInput {
            request_items: HashMap::from([(
                self.name.clone(),
                KeysAndAttributes {
                    keys,
                    attributes_to_get: Vec::new(),
                    consistent_read: None,
                },
            )]),
        };
        let output: BatchGetItemOutput =
            dispatch(&*self.executor, Operation::BatchGetItem, &input).await?;
        let mut wire_items = output
            .responses
            .into_iter()
            .find(|(name, _)| *name == self.name)
            .map(|(_, items)| items)
            .unwrap_or_default();
        wire_items.drain(..).map(codec::unpack_item).collect()
    }

    // --- Writes ---

    /// Insert a new item, requiring that no item with this key exists yet.
    ///
    /// The precondition is expressed on the hash key attribute. If another
    /// writer created the item first, the store rejects the write and the
    /// call fails with [`Error::ConcurrencyConflict`]. Resolves to the
    /// store's consumed-capacity report.
    pub async fn put(&self, attributes: Item) -> Result<Option<ConsumedCapacity>> {
        let expected = HashMap::from([(
            self.schema.hash_key_name().to_owned(),
            ExpectedAttributeValue::absent(),
        )]);
        self.put_inner(attributes, expected).await
    }

    /// Insert or replace an item with no precondition.
    pub async fn put_unconditional(&self, attributes: Item) -> Result<Option<ConsumedCapacity>> {
        self.put_inner(attributes, HashMap::new()).await
    }

    async fn put_inner(
        &self,
        attributes: Item,
        expected: HashMap<String, ExpectedAttributeValue>,
    ) -> Result<Option<ConsumedCapacity>> {
        let input = PutItemInput {
            table_name: self.name.clone(),
            item: self.packed_item(attributes)?,
            expected,
            return_values: None,
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
        };
        let output: PutItemOutput = dispatch(&*self.executor, Operation::PutItem, &input).await?;
        Ok(output.consumed_capacity)
    }

    /// Overwrite the non-key attributes of an item.
    ///
    /// Resolves to the item's attribute values after the write.
    pub async fn update(&self, attributes: Item) -> Result<Item> {
        self.apply_updates(attributes, AttributeAction::Put).await
    }

    /// Atomically add the given numeric attributes to an item.
    ///
    /// Resolves to the item's attribute values after accumulation, so each
    /// call observes the cumulative result.
    pub async fn increment(&self, attributes: Item) -> Result<Item> {
        self.apply_updates(attributes, AttributeAction::Add).await
    }

    async fn apply_updates(&self, attributes: Item, action: AttributeAction) -> Result<Item> {
        let extracted = self.schema.extract_keys(attributes)?;
        let updates = extracted
            .rest
            .iter()
            .map(|(name, value)| {
                Ok((
                    name.clone(),
                    AttributeValueUpdate {
                        value: Some(codec::pack(value)?),
                        action,
                    },
                ))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        let input = UpdateItemInput {
            table_name: self.name.clone(),
            key: self
                .schema
                .build_key(&extracted.hash, extracted.range.as_ref())?,
            attribute_updates: updates,
            expected: HashMap::new(),
            return_values: Some(ReturnValue::AllNew),
        };
        let output: UpdateItemOutput =
            dispatch(&*self.executor, Operation::UpdateItem, &input).await?;
        codec::unpack_item(output.attributes)
    }

    /// Delete an item, optionally guarded by equality preconditions.
    ///
    /// Non-key attributes in `attributes` become must-equal expectations;
    /// if any no longer matches at the store, the call fails with
    /// [`Error::ConcurrencyConflict`]. Resolves to the store's
    /// consumed-capacity report.
    pub async fn remove(&self, attributes: Item) -> Result<Option<ConsumedCapacity>> {
        let extracted = self.schema.extract_keys(attributes)?;
        let expected = extracted
            .rest
            .iter()
            .map(|(name, value)| {
                Ok((
                    name.clone(),
                    ExpectedAttributeValue::equals(codec::pack(value)?),
                ))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        let input = DeleteItemInput {
            table_name: self.name.clone(),
            key: self
                .schema
                .build_key(&extracted.hash, extracted.range.as_ref())?,
            expected,
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
        };
        let output: DeleteItemOutput =
            dispatch(&*self.executor, Operation::DeleteItem, &input).await?;
        Ok(output.consumed_capacity)
    }

    // --- Query & Scan ---

    /// Start building a range query for one hash key.
    ///
    /// The builder must be given a range condition (`gt`/`lt`) before
    /// execution and is consumed by it; build a fresh one per query.
    #[must_use]
    pub fn query(&self, hash: impl Into<Value>) -> QueryBuilder<'_> {
        QueryBuilder::new(self, hash.into())
    }

    /// Start building a table scan. The filter is optional.
    #[must_use]
    pub fn scan(&self) -> ScanBuilder<'_> {
        ScanBuilder::new(self)
    }

    // --- Batch writes ---

    /// Put up to [`MAX_BATCH_OPERATIONS`] items in one batched call.
    ///
    /// Exceeding the ceiling fails locally with [`Error::LimitExceeded`];
    /// nothing is dispatched.
    pub async fn mass_write(&self, items: Vec<Item>) -> Result<BatchWriteItemOutput> {
        if items.len() > MAX_BATCH_OPERATIONS {
            return Err(Error::LimitExceeded(items.len()));
        }
        let requests = items
            .into_iter()
            .map(|attributes| Ok(WriteRequest::put(self.packed_item(attributes)?)))
            .collect::<Result<Vec<_>>>()?;
        let input = BatchWriteItemInput {
            request_items: HashMap::from([(self.name.clone(), requests)]),
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
        };
        dispatch(&*self.executor, Operation::BatchWriteItem, &input).await
    }

    /// Validate an item's key attributes and marshal the whole item.
    pub(crate) fn packed_item(&self, attributes: Item) -> Result<WireItem> {
        let extracted = self.schema.extract_keys(attributes)?;
        let mut wire = codec::pack_item(&extracted.rest)?;
        wire.extend(
            self.schema
                .build_key(&extracted.hash, extracted.range.as_ref())?,
        );
        Ok(wire)
    }
}
