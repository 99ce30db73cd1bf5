//! HTTP authentication provider.
//!
//! This module provides `HttpAuthProvider`, an `AuthProvider` that posts
//! credentials as JSON to a remote authentication endpoint and decodes the
//! returned `AuthResult`.

pub mod client;
pub mod error;

pub use client::HttpAuthProvider;
pub use error::ApiError;
