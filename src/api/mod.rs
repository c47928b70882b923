//! Blocking HTTP collaborators for the catalogue service: a rate-limited
//! client wrapper plus one module per resource family.

pub mod client;
pub mod object_definitions;
pub mod objects;
pub mod roles;
pub mod users;

pub use client::{ApiClient, Credentials};
