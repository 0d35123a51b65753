pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{LoggingConfig, OutlineConfig};
pub use error::{OutlineError, Result};
pub use models::*;
