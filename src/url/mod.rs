//! URL handling module
//!
//! This module resolves hyperlinks found on archive pages and derives the
//! identifiers that key the result store.

mod ids;
mod resolve;

// Re-export main functions
pub use ids::{dataset_id_from_url, record_id_from_url};
pub use resolve::{path_has_prefix, resolve_link};
