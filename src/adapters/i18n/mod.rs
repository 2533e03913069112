//! Localization adapters.

mod catalog;

pub use catalog::{Catalog, CatalogEntry, CatalogError, CatalogTextResolver};
