//! Request extractors.
//!
//! - [`auth::AuthUser`] -- caller identity from a Bearer access token.
//! - [`auth::RequireAdmin`] -- the same, restricted to the `admin` role.
//! - [`context::RequestContext`] -- the negotiated locale.
//! - [`context::ClientInfo`] -- user agent and client IP for new sessions.

pub mod auth;
pub mod context;
