//! Authentication module for the ballchasing API.
//!
//! ballchasing.com authenticates with a single opaque API key sent in the
//! `Authorization` header. This module provides secure storage for that key
//! and helpers for loading it from the environment.

mod credentials;

pub use credentials::ApiKey;
