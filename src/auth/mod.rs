//! Authentication for the GitHub APIs.
//!
//! ghwrapped never stores credentials of its own beyond the optional token
//! in the config file; it discovers a token from the usual places.

pub mod token;

pub use token::{gh_auth_token, resolve_token, TokenSource};
