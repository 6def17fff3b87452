//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `storage` abstracts the durable key-value side channel and `session`
//! layers the typed session/redirect records on top of it.

pub mod session;
pub mod storage;
