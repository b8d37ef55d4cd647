pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod events;
pub mod filter;
pub mod hasher;
pub mod snapshot;
pub mod watcher;

pub use diff::*;
pub use error::*;
pub use events::*;
pub use filter::*;
pub use hasher::*;
pub use snapshot::*;
pub use watcher::*;
