//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields plus the acting user) for patches,
//!   applied in memory with `apply` before the version-checked write
//! - A list filter and the column safe-list it may be sorted by

pub mod brand;
pub mod category;
pub mod language;
pub mod session;
pub mod translation;
pub mod user;
