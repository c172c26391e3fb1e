pub mod export;
pub mod persistence;
pub mod repositories;

pub use persistence::FileStore;
pub use repositories::InMemoryStore;
