//! School roster API client library
//!
//! Typed models for members and groups, and an async client for the school
//! administration API (member listing and group membership changes).

pub mod api;
pub mod auth;
pub mod error;
pub mod model;

mod client;

pub use api::DirectoryApi;
pub use api::MembershipApi;
pub use client::*;
