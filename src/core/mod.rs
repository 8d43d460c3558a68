//! Core types - pure abstractions shared across the codebase.

mod url;

pub use url::{PathnameIssue, RoutePath, check_site_relative};
