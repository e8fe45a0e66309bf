//! manasooth-storage
//!
//! Key/value JSON blobs on the local filesystem, one `<key>.json` file per
//! key, plus typed accessors for every blob the service keeps.

pub mod error;
pub mod flow;
pub mod goals;
pub mod history;
pub mod mood;
pub mod objects;
pub mod scores;
pub mod state;

pub use objects::Store;
pub use state::Loaded;
