//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The route host picks one of these per `Resolution`; pages only render and
//! call the API client from context.

pub mod event_detail;
pub mod fallback;
pub mod home;
pub mod login;
pub mod placeholder;
pub mod timeline;
