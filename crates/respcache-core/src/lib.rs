//! respcache-core: Core traits and types for the respcache library
//!
//! This crate provides the cache key and entry model, the repository trait
//! shared by every storage backend, and the metrics hook used to observe
//! faults that the repositories swallow.

mod error;
mod traits;
mod types;

pub use error::{CacheError, Result};
pub use traits::*;
pub use types::*;
