//! Request-boundary helpers shared by every route

pub mod error;
pub mod extract;

pub use error::ApiError;
pub use extract::{validated, json_config, query_config, path_config};
