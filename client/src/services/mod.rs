//! # Services Module
//!
//! Everything that talks to the outside world: the remote expense collection
//! (over HTTP or in-process) and the logging setup.

pub mod api;
pub mod logging;
pub mod memory;
pub mod remote;

pub use api::ApiClient;
pub use logging::init_logging;
pub use memory::{InMemoryRemote, RemoteCalls};
pub use remote::RemoteSyncClient;
