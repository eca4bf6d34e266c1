//! Infrastructure layer - external service implementations

pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod services;
pub mod vector;

pub use http_client::{HttpClient, HttpClientTrait};
