//! Small scalar types shared by many endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A duration in OpenSearch time-unit notation, e.g. `30s` or `1m`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(String);

impl Time {
    /// Create a time value from its wire form.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Time {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Time {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which kinds of indices wildcard expressions expand to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandWildcard {
    /// Match any index, including hidden ones.
    All,
    /// Match open, non-hidden indices.
    Open,
    /// Match closed, non-hidden indices.
    Closed,
    /// Match hidden indices (combine with `open` or `closed`).
    Hidden,
    /// Wildcard expressions are not accepted.
    None,
}

impl ExpandWildcard {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpandWildcard::All => "all",
            ExpandWildcard::Open => "open",
            ExpandWildcard::Closed => "closed",
            ExpandWildcard::Hidden => "hidden",
            ExpandWildcard::None => "none",
        }
    }
}

/// Comma-join wildcard options for a query parameter.
pub(crate) fn join_wildcards(values: &[ExpandWildcard]) -> String {
    values
        .iter()
        .map(ExpandWildcard::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Number of active shard copies to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitForActiveShards {
    /// A specific number of copies.
    Count(u32),
    /// All copies.
    All,
}

impl fmt::Display for WaitForActiveShards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitForActiveShards::Count(count) => write!(f, "{}", count),
            WaitForActiveShards::All => f.write_str("all"),
        }
    }
}

impl From<u32> for WaitForActiveShards {
    fn from(count: u32) -> Self {
        WaitForActiveShards::Count(count)
    }
}

/// Cluster, index, or data stream health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    /// All shards are allocated.
    #[serde(rename = "green", alias = "GREEN")]
    Green,
    /// Primaries allocated, some replicas not.
    #[serde(rename = "yellow", alias = "YELLOW")]
    Yellow,
    /// Some primaries unallocated.
    #[serde(rename = "red", alias = "RED")]
    Red,
}

/// Result of an endpoint that answers with a status code only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanResponse {
    value: bool,
}

impl BooleanResponse {
    /// Create a boolean response.
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    /// The answer.
    pub fn value(&self) -> bool {
        self.value
    }
}
