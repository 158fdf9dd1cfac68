//! Catalog handling: quality parsing, source ranking, subtitle dedupe, and
//! the HTTP client that fetches catalogs.

pub mod client;
pub mod quality;
pub mod rank;
pub mod subtitles;

pub use client::{CatalogClient, CatalogSource};
pub use quality::{QualityLabel, HD_RANK};
pub use rank::{label_of, rank, unique_qualities, SourceGroup};
pub use subtitles::dedupe;
