//! In-process repository and its reaper

mod reaper;
mod repository;

pub use reaper::{MIN_REAP_PERIOD, Reaper};
pub use repository::{MemoryConfig, MemoryRepository};
