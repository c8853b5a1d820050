// src/compose/mod.rs

//! Environment variable composition.
//!
//! - [`catalog`] is the static table of recognised keys and the pure
//!   functions computing their defaults.
//! - [`compositor`] decides, per key, between a user override and the
//!   computed default.

pub mod catalog;
pub mod compositor;

pub use catalog::{CatalogEntry, HostDefaults, StarterDefaults, GENERIC_KEYS, STARTER_KEYS};
pub use compositor::{Compositor, Resolved};
