// src/paths/mod.rs

//! Path handling for descriptors.
//!
//! - [`aggregate`] builds the search-path prefix out of optional tool
//!   directories and prepends it to an inherited search path.
//! - [`compare`] decides whether two deployment paths name the same
//!   location (used for in-place detection).

pub mod aggregate;
pub mod compare;

pub use aggregate::{aggregate, prepend, SEARCH_PATH_SEPARATOR};
pub use compare::{normalize_for_comparison, paths_equal};
