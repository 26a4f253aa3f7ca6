//! Shard-level outcome reporting (`_shards`).

use super::ErrorCause;
use crate::builder::{push_all, require, MissingRequiredProperty, ObjectBuilder};
use crate::codec::{json_object, serialize_optional, ObjectDeserializer, SerializeFields};
use once_cell::sync::Lazy;
use serde::ser::SerializeMap;

/// Counts of shards an operation ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardStatistics {
    total: u32,
    successful: u32,
    failed: u32,
    skipped: Option<u32>,
    failures: Option<Vec<ShardFailure>>,
}

impl ShardStatistics {
    /// Create a new builder.
    pub fn builder() -> ShardStatisticsBuilder {
        ShardStatisticsBuilder::default()
    }

    /// Shards targeted.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Shards that succeeded.
    pub fn successful(&self) -> u32 {
        self.successful
    }

    /// Shards that failed.
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Shards skipped.
    pub fn skipped(&self) -> Option<u32> {
        self.skipped
    }

    /// Per-shard failures.
    pub fn failures(&self) -> &[ShardFailure] {
        self.failures.as_deref().unwrap_or_default()
    }
}

impl SerializeFields for ShardStatistics {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("total", &self.total)?;
        map.serialize_entry("successful", &self.successful)?;
        map.serialize_entry("failed", &self.failed)?;
        serialize_optional(map, "skipped", self.skipped.as_ref())?;
        serialize_optional(map, "failures", self.failures.as_ref())?;
        Ok(())
    }
}

/// Builder for [`ShardStatistics`].
#[derive(Debug, Default)]
pub struct ShardStatisticsBuilder {
    total: Option<u32>,
    successful: Option<u32>,
    failed: Option<u32>,
    skipped: Option<u32>,
    failures: Option<Vec<ShardFailure>>,
}

impl ShardStatisticsBuilder {
    /// Set the total.
    pub fn total(mut self, total: u32) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the successful count.
    pub fn successful(mut self, successful: u32) -> Self {
        self.successful = Some(successful);
        self
    }

    /// Set the failed count.
    pub fn failed(mut self, failed: u32) -> Self {
        self.failed = Some(failed);
        self
    }

    /// Set the skipped count.
    pub fn skipped(mut self, skipped: impl Into<Option<u32>>) -> Self {
        self.skipped = skipped.into();
        self
    }

    /// Add a failure.
    pub fn failure(mut self, failure: ShardFailure) -> Self {
        push_all(&mut self.failures, [failure]);
        self
    }
}

impl ObjectBuilder for ShardStatisticsBuilder {
    type Value = ShardStatistics;

    fn build(self) -> Result<ShardStatistics, MissingRequiredProperty> {
        Ok(ShardStatistics {
            total: require("ShardStatistics", "total", self.total)?,
            successful: require("ShardStatistics", "successful", self.successful)?,
            failed: require("ShardStatistics", "failed", self.failed)?,
            skipped: self.skipped,
            failures: self.failures,
        })
    }
}

static SHARD_STATISTICS: Lazy<ObjectDeserializer<ShardStatisticsBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<ShardStatisticsBuilder>::new("ShardStatistics");
    op.add("total", |b, v: u32| b.total = Some(v));
    op.add("successful", |b, v: u32| b.successful = Some(v));
    op.add("failed", |b, v: u32| b.failed = Some(v));
    op.add("skipped", |b, v: u32| b.skipped = Some(v));
    op.add("failures", |b, v: Vec<ShardFailure>| b.failures = Some(v));
    op
});

json_object!(ShardStatistics, SHARD_STATISTICS);

/// A failure on one shard.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardFailure {
    index: Option<String>,
    node: Option<String>,
    reason: ErrorCause,
    shard: i32,
    status: Option<String>,
}

impl ShardFailure {
    /// Create a new builder.
    pub fn builder() -> ShardFailureBuilder {
        ShardFailureBuilder::default()
    }

    /// Index of the failed shard.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Node the shard was on.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    /// Why it failed.
    pub fn reason(&self) -> &ErrorCause {
        &self.reason
    }

    /// Shard number.
    pub fn shard(&self) -> i32 {
        self.shard
    }

    /// REST status name, e.g. `INTERNAL_SERVER_ERROR`.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl SerializeFields for ShardFailure {
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        serialize_optional(map, "index", self.index.as_ref())?;
        serialize_optional(map, "node", self.node.as_ref())?;
        map.serialize_entry("reason", &self.reason)?;
        map.serialize_entry("shard", &self.shard)?;
        serialize_optional(map, "status", self.status.as_ref())?;
        Ok(())
    }
}

/// Builder for [`ShardFailure`].
#[derive(Debug, Default)]
pub struct ShardFailureBuilder {
    index: Option<String>,
    node: Option<String>,
    reason: Option<ErrorCause>,
    shard: Option<i32>,
    status: Option<String>,
}

impl ShardFailureBuilder {
    /// Set the index.
    pub fn index(mut self, index: impl Into<Option<String>>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the node.
    pub fn node(mut self, node: impl Into<Option<String>>) -> Self {
        self.node = node.into();
        self
    }

    /// Set the reason.
    pub fn reason(mut self, reason: ErrorCause) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Set the shard number.
    pub fn shard(mut self, shard: i32) -> Self {
        self.shard = Some(shard);
        self
    }

    /// Set the status.
    pub fn status(mut self, status: impl Into<Option<String>>) -> Self {
        self.status = status.into();
        self
    }
}

impl ObjectBuilder for ShardFailureBuilder {
    type Value = ShardFailure;

    fn build(self) -> Result<ShardFailure, MissingRequiredProperty> {
        Ok(ShardFailure {
            index: self.index,
            node: self.node,
            reason: require("ShardFailure", "reason", self.reason)?,
            shard: require("ShardFailure", "shard", self.shard)?,
            status: self.status,
        })
    }
}

static SHARD_FAILURE: Lazy<ObjectDeserializer<ShardFailureBuilder>> = Lazy::new(|| {
    let mut op = ObjectDeserializer::<ShardFailureBuilder>::new("ShardFailure");
    op.add("index", |b, v: String| b.index = Some(v));
    op.add("node", |b, v: String| b.node = Some(v));
    op.add("reason", |b, v: ErrorCause| b.reason = Some(v));
    op.add("shard", |b, v: i32| b.shard = Some(v));
    op.add("status", |b, v: String| b.status = Some(v));
    op
});

json_object!(ShardFailure, SHARD_FAILURE);
