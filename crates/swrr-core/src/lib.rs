pub mod config;

pub use config::{BackendSpec, PoolSpec, SwrrConfig};
