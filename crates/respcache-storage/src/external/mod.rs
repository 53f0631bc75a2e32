//! Repository over a remote store with native expiration

mod repository;
mod store;

pub use repository::ExternalRepository;
pub use store::RemoteStore;
