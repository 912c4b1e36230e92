//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`fixtures`] - canned activity for a sample user

pub mod fixtures;
pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
