pub mod config;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod process;

pub use config::EtlConfig;
pub use error::EtlError;
pub use pipeline::{Pipeline, PipelineReport};
