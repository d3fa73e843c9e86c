//! Configuration module

mod store;

pub use store::HighlightConfig;
pub use store::StoreConfig;
