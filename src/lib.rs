pub mod config;
pub mod export;
pub mod fetch;
pub mod pipeline;
pub mod process;
pub mod record;
pub mod sort;
pub mod store;
pub mod view;

pub use config::{Config, DedupPolicy};
pub use record::{CanonicalRecord, PublicationDate};
pub use sort::{Direction, SortKey};
