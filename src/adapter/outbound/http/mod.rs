//! HTTP transport for the reporting APIs.

pub mod client;
pub mod settings;

pub use client::ApiClient;
pub use settings::HttpConfig;
