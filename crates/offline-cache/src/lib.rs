//! Offline Cache Worker
//!
//! Target-independent core of the service worker:
//! - config: versioned cache name and shell asset manifest
//! - host: the `WorkerHost` port (cache storage, network, clients)
//! - worker: install/activate lifecycle and the cache-first fetch strategy
//! - control: page -> worker control messages and their queue
//!
//! The browser binding lives in the `service-worker` crate.

mod config;
mod control;
mod error;
mod host;
mod worker;

pub use config::{WorkerConfig, API_MARKER, CACHE_NAME, FALLBACK_PATH, SHELL_ASSETS};
pub use control::{control_channel, ControlMessage, ControlReceiver, ControlSender};
pub use error::{WorkerError, WorkerResult};
pub use host::{FetchRequest, FetchResponse, ResponseKind, WorkerHost};
pub use worker::{OfflineWorker, WorkerPhase};
