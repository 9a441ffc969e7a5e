pub mod builder;
pub mod diagnostic;
pub mod fingerprint;

pub use builder::{build_catalog, CatalogBuild};
