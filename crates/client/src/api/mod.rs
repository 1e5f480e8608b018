//! QueueMate REST API.
//!
//! - [`endpoints`] - URL construction for every route
//! - [`auth`] - login and signup, made without a credential
//! - [`ApiClient`] - authenticated shop, queue and barber operations

pub mod auth;
mod barbers;
mod client;
pub mod endpoints;
mod shops;

pub use auth::{AuthGrant, AuthKind};
pub use client::ApiClient;
pub use endpoints::Endpoints;
