//! Client-side routing: the route table and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `routes` is the static table, `location` models a target, `guard` makes
//! the auth decision, and `navigator` drives each transition to a
//! `Resolution` the shell renders.

pub mod guard;
pub mod location;
pub mod navigator;
pub mod routes;
