//! Value types shared across endpoint namespaces.

mod acknowledged;
mod common;
mod error;
mod shards;

pub use acknowledged::{AcknowledgedResponse, AcknowledgedResponseBuilder};
pub use common::{BooleanResponse, ExpandWildcard, HealthStatus, Time, WaitForActiveShards};
pub use error::{ErrorCause, ErrorCauseBuilder, ErrorResponse, ErrorResponseBuilder};
pub use shards::{ShardFailure, ShardFailureBuilder, ShardStatistics, ShardStatisticsBuilder};

pub(crate) use common::join_wildcards;
