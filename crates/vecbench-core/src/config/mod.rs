pub mod connection;
pub mod index;

pub use connection::{Address, ConnectionConfig, Secret};
pub use index::{HnswParams, IndexConfig, IndexParams, IvfFlatParams, MetricType};
