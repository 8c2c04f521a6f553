//! Catalog source: catalog files and the built-in Aurelio collection.

mod loader;

pub use loader::{CatalogLoadError, CatalogLoader};
