//! Infrastructure layer: the in-memory yard and configuration loading.

pub mod config;
pub mod error;
pub mod seed;
pub mod yard;


pub use config::{ConfigError, YardConfig};
pub use error::{YardError, YardResult};
pub use yard::Yard;
