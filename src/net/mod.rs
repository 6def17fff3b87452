//! Networking modules for the events REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes the typed operations, `interceptor` wraps each call with the
//! auth/error policy, `transport` is the fetch seam, and `types` defines the
//! wire schema.

pub mod api;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
