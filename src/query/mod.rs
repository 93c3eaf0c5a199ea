//! Query cache layer over the REST API.

pub mod cache;
pub mod key;
pub mod metrics;
pub mod projects;

pub use cache::QueryCache;
pub use key::{project_keys, QueryKey};
pub use metrics::{CacheMetrics, CacheMetricsReport};
pub use projects::{ProjectQueries, QueryState, ADMIN_STALE_TIME, PUBLIC_STALE_TIME};
