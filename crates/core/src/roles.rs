//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in the initial migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CUSTOMER: &str = "customer";

/// Every role a user row may carry.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_CUSTOMER];

/// Check whether a role name is known.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
