//! Business logic services

pub mod cache;
pub mod extractor;
pub mod formats;

pub use cache::{Cache, CacheEntry, CacheStats, TextCache};
pub use extractor::ExtractionService;
