//! Local tools that need no remote service

pub mod directory;
pub mod resources;
pub mod word_count;

pub use directory::{search_brokers, Broker, ScripLink};
pub use resources::{ResourceLibrary, ALL_CATEGORIES};
pub use word_count::TextStats;
