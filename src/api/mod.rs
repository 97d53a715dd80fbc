//! Instagram API module.
//!
//! This module provides:
//! - HTTP client for the profile feed, GraphQL continuation and post pages
//! - A transport seam so the client can run against canned responses
//! - Feed response types

pub mod client;
pub mod opaque;
pub mod transport;
pub mod types;

pub use client::InstaApi;
pub use types::*;
