/// GameSales - Faceted Sales Dashboard Engine
///
/// Loads a video-game sales dataset, filters it by game, publisher,
/// developer, platform and year, and computes the KPIs and chart series a
/// dashboard page shows for the current selection.
///
/// The record set is immutable once loaded. Every selection produces a new
/// filtered view and every statistic is recomputed from that view.

pub mod record;
pub mod record_set;
pub mod facet;
pub mod filter;
pub mod aggregate;
pub mod snapshot;
pub mod dashboard;
pub mod error;
pub mod config;

pub use record::{Field, FieldType, FieldValue, NumericField, Record};
pub use record_set::{FilteredView, RecordSet};
pub use facet::{distinct_values, Facet, FacetOptions};
pub use filter::{apply, FacetSelection};
pub use aggregate::{count_non_null, distinct_ratio, group_sum, max, mean, min, sum, value_counts};
pub use snapshot::{ChartKind, ChartPoint, ChartSeries, Charts, DashboardSnapshot, DataStatus, Kpi, Kpis};
pub use dashboard::Dashboard;
pub use error::{ConfigError, LoadError};
pub use config::{DbConfig, ServerConfig};

// Database loading - only when the mysql feature is enabled
#[cfg(feature = "mysql")]
pub mod loader;

// HTTP server - only when server feature is enabled
#[cfg(feature = "server")]
pub mod server;
