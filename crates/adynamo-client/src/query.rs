//! Deferred query and scan builders.
//!
//! Both builders are fluent and single-shot: configuration methods consume
//! and return the builder, and `execute` takes it by value, so a builder
//! cannot be reused after dispatch. A query must be given a range condition
//! before execution; a scan may run unfiltered.

use std::collections::HashMap;

use adynamo_model::Operation;
use adynamo_model::input::{QueryInput, ScanInput};
use adynamo_model::output::{QueryOutput, ScanOutput};
use adynamo_model::types::{ComparisonOperator, Condition};

use crate::codec::{self, Item, Value};
use crate::error::{Error, Result};
use crate::executor::dispatch;
use crate::table::Table;

/// Builds a range query against one hash key.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    table: &'a Table,
    hash: Value,
    condition: Option<(ComparisonOperator, Value)>,
    forward: bool,
    limit: Option<i32>,
    consistent_read: bool,
    attributes_to_get: Vec<String>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(table: &'a Table, hash: Value) -> Self {
        Self {
            table,
            hash,
            condition: None,
            forward: true,
            limit: None,
            consistent_read: false,
            attributes_to_get: Vec::new(),
        }
    }

    /// Require range values strictly greater than `bound`.
    #[must_use]
    pub fn gt(mut self, bound: impl Into<Value>) -> Self {
        self.condition = Some((ComparisonOperator::Gt, bound.into()));
        self
    }

    /// Require range values strictly less than `bound`.
    #[must_use]
    pub fn lt(mut self, bound: impl Into<Value>) -> Self {
        self.condition = Some((ComparisonOperator::Lt, bound.into()));
        self
    }

    /// Return items in ascending range order (the default).
    #[must_use]
    pub fn asc(mut self) -> Self {
        self.forward = true;
        self
    }

    /// Return items in descending range order.
    #[must_use]
    pub fn desc(mut self) -> Self {
        self.forward = false;
        self
    }

    /// Cap the number of items returned.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(i32::try_from(limit).unwrap_or(i32::MAX));
        self
    }

    /// Use a strongly consistent read.
    #[must_use]
    pub fn consistent_read(mut self) -> Self {
        self.consistent_read = true;
        self
    }

    /// Restrict the attributes returned for each item.
    #[must_use]
    pub fn attributes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.attributes_to_get = names.into_iter().map(Into::into).collect();
        self
    }

    fn build_input(&self) -> Result<QueryInput> {
        let Some((operator, bound)) = &self.condition else {
            return Err(Error::Precondition);
        };
        let range_name = self
            .table
            .schema
            .range_key_name()
            .ok_or_else(|| Error::Schema("table declares no range key to query".to_owned()))?;
        let key_conditions = HashMap::from([
            (
                self.table.schema.hash_key_name().to_owned(),
                Condition {
                    comparison_operator: ComparisonOperator::Eq,
                    attribute_value_list: vec![codec::pack(&self.hash)?],
                },
            ),
            (
                range_name.to_owned(),
                Condition {
                    comparison_operator: *operator,
                    attribute_value_list: vec![codec::pack(bound)?],
                },
            ),
        ]);
        Ok(QueryInput {
            table_name: self.table.name.clone(),
            key_conditions,
            attributes_to_get: self.attributes_to_get.clone(),
            scan_index_forward: Some(self.forward),
            limit: self.limit,
            consistent_read: self.consistent_read.then_some(true),
        })
    }

    /// Dispatch the query, consuming the builder.
    ///
    /// Fails with [`Error::Precondition`] when no range condition was
    /// configured; resolves to the matching items in store order.
    pub async fn execute(self) -> Result<Vec<Item>> {
        let input = self.build_input()?;
        let output: QueryOutput =
            dispatch(&*self.table.executor, Operation::Query, &input).await?;
        output.items.into_iter().map(codec::unpack_item).collect()
    }
}

/// Builds a table scan with an optional attribute filter.
#[derive(Debug)]
pub struct ScanBuilder<'a> {
    table: &'a Table,
    filter: Option<(String, ComparisonOperator, Value)>,
    forward: bool,
    limit: Option<i32>,
}

impl<'a> ScanBuilder<'a> {
    pub(crate) fn new(table: &'a Table) -> Self {
        Self {
            table,
            filter: None,
            forward: true,
            limit: None,
        }
    }

    /// Keep only items whose `attr` is strictly greater than `bound`.
    #[must_use]
    pub fn gt(mut self, attr: impl Into<String>, bound: impl Into<Value>) -> Self {
        self.filter = Some((attr.into(), ComparisonOperator::Gt, bound.into()));
        self
    }

    /// Keep only items whose `attr` is strictly less than `bound`.
    #[must_use]
    pub fn lt(mut self, attr: impl Into<String>, bound: impl Into<Value>) -> Self {
        self.filter = Some((attr.into(), ComparisonOperator::Lt, bound.into()));
        self
    }

    /// Return items in forward store order (the default).
    #[must_use]
    pub fn asc(mut self) -> Self {
        self.forward = true;
        self
    }

    /// Return items in reverse store order.
    #[must_use]
    pub fn desc(mut self) -> Self {
        self.forward = false;
        self
    }

    /// Cap the number of items returned.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(i32::try_from(limit).unwrap_or(i32::MAX));
        self
    }

    fn build_input(&self) -> Result<ScanInput> {
        let scan_filter = match &self.filter {
            Some((attr, operator, bound)) => HashMap::from([(
                attr.clone(),
                Condition {
                    comparison_operator: *operator,
                    attribute_value_list: vec![codec::pack(bound)?],
                },
            )]),
            None => HashMap::new(),
        };
        Ok(ScanInput {
            table_name: self.table.name.clone(),
            scan_filter,
            scan_index_forward: Some(self.forward),
            limit: self.limit,
        })
    }

    /// Dispatch the scan, consuming the builder. Always valid; an
    /// unconfigured builder scans the whole table.
    pub async fn execute(self) -> Result<Vec<Item>> {
        let input = self.build_input()?;
        let output: ScanOutput = dispatch(&*self.table.executor, Operation::Scan, &input).await?;
        output.items.into_iter().map(codec::unpack_item).collect()
    }
}
