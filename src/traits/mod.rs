//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP GET/POST used by the GitHub sources

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
