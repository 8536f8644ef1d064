//! Persistence around the classification and comparison core: catalog
//! loading, comparison snapshots, and the accepted-document archive.

pub mod archive;
pub mod catalog;
mod error;
pub mod snapshot;

pub use archive::{archive_document, archive_file_name};
pub use catalog::{load_catalog, read_parquet};
pub use error::StoreError;
pub use snapshot::ComparisonSnapshot;
