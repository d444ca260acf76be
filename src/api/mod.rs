//! HTTP access to the athletes API: client construction, URL building and
//! response/error handling.

pub mod client;
pub mod http_client;
pub mod response;
pub mod urls;

pub use client::ApiClient;
