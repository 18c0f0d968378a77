//! The named table registry and cross-table batch writes.
//!
//! A [`Database`] is built once at startup from an explicit list of
//! `(name, schema)` pairs and owns the shared executor; tables are
//! registered at construction, never discovered. Cross-table batch
//! operations enforce the combined operation ceiling locally before any
//! dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use adynamo_model::Operation;
use adynamo_model::input::BatchWriteItemInput;
use adynamo_model::output::BatchWriteItemOutput;
use adynamo_model::types::{ReturnConsumedCapacity, WriteRequest};

use crate::codec::Item;
use crate::error::{Error, MAX_BATCH_OPERATIONS, Result};
use crate::executor::{RequestExecutor, dispatch};
use crate::schema::TableSchema;
use crate::table::Table;

/// A registry of tables sharing one executor.
#[derive(Clone)]
pub struct Database {
    executor: Arc<dyn RequestExecutor>,
    tables: HashMap<String, Table>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("tables", &self.tables.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Build a database from an explicit list of table schemas.
    ///
    /// Every schema is validated up front; the registry is immutable
    /// afterwards.
    pub fn new(
        executor: Arc<dyn RequestExecutor>,
        schemas: impl IntoIterator<Item = (impl Into<String>, TableSchema)>,
    ) -> Result<Self> {
        let mut tables = HashMap::new();
        for (name, schema) in schemas {
            let name = name.into();
            let table = Table::new(name.clone(), schema, Arc::clone(&executor))?;
            tables.insert(name, table);
        }
        Ok(Self { executor, tables })
    }

    /// Look up a registered table.
    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::UnknownTable(name.to_owned()))
    }

    /// The names of all registered tables.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Put items into several tables in one batched call.
    ///
    /// All named tables must be registered and the combined operation count
    /// must not exceed [`MAX_BATCH_OPERATIONS`]; both are checked before
    /// anything is dispatched. Resolves to the store's per-table
    /// unprocessed-items report.
    pub async fn multi_write(
        &self,
        batches: impl IntoIterator<Item = (impl Into<String>, Vec<Item>)>,
    ) -> Result<BatchWriteItemOutput> {
        let batches = self.collect_batches(batches)?;
        let mut request_items: HashMap<String, Vec<WriteRequest>> = HashMap::new();
        for (name, items) in batches {
            let table = &self.tables[&name];
            let requests = request_items.entry(name).or_default();
            for attributes in items {
                requests.push(WriteRequest::put(table.packed_item(attributes)?));
            }
        }
        self.dispatch_batch(request_items).await
    }

    /// Delete items from several tables in one batched call.
    ///
    /// Key specs must contain exactly the declared key attributes of their
    /// table; extras fail with [`Error::UnsupportedArgument`]. The same
    /// combined ceiling applies as for [`Self::multi_write`].
    pub async fn multi_delete(
        &self,
        batches: impl IntoIterator<Item = (impl Into<String>, Vec<Item>)>,
    ) -> Result<BatchWriteItemOutput> {
        let batches = self.collect_batches(batches)?;
        let mut request_items: HashMap<String, Vec<WriteRequest>> = HashMap::new();
        for (name, specs) in batches {
            let table = &self.tables[&name];
            let requests = request_items.entry(name).or_default();
            for spec in specs {
                let extracted = table.schema().extract_keys(spec)?;
                if let Some(extra) = extracted.rest.keys().next() {
                    return Err(Error::UnsupportedArgument(extra.clone()));
                }
                let key = table
                    .schema()
                    .build_key(&extracted.hash, extracted.range.as_ref())?;
                requests.push(WriteRequest::delete(key));
            }
        }
        self.dispatch_batch(request_items).await
    }

    /// Resolve table names and enforce the combined operation ceiling.
    fn collect_batches(
        &self,
        batches: impl IntoIterator<Item = (impl Into<String>, Vec<Item>)>,
    ) -> Result<Vec<(String, Vec<Item>)>> {
        let batches: Vec<(String, Vec<Item>)> = batches
            .into_iter()
            .map(|(name, items)| (name.into(), items))
            .collect();
        for (name, _) in &batches {
            if !self.tables.contains_key(name) {
                return Err(Error::UnknownTable(name.clone()));
            }
        }
        let total: usize = batches.iter().map(|(_, items)| items.len()).sum();
        if total > MAX_BATCH_OPERATIONS {
            return Err(Error::LimitExceeded(total));
        }
        Ok(batches)
    }

    async fn dispatch_batch(
        &self,
        request_items: HashMap<String, Vec<WriteRequest>>,
    ) -> Result<BatchWriteItemOutput> {
        let input = BatchWriteItemInput {
            request_items,
            return_consumed_capacity: Some(ReturnConsumedCapacity::Total),
        };
        dispatch(&*self.executor, Operation::BatchWriteItem, &input).await
    }
}
