pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::ExperimentConfig;
pub use error::{BookError, Result};
pub use types::{Condition, Point, Side};
