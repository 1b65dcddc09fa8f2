//! Storefront domain core.
//!
//! Pure types and rules shared by the persistence and HTTP layers. Nothing in
//! this crate performs I/O, so everything here is unit-testable in isolation.

pub mod error;
pub mod filters;
pub mod locale;
pub mod pagination;
pub mod roles;
pub mod sort;
pub mod types;
pub mod validation;
