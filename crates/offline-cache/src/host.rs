//! Worker Host Port
//!
//! Everything the worker needs from its execution context: cache buckets,
//! the network and the clients it controls. The browser implements this
//! over `ServiceWorkerGlobalScope`; tests use an in-memory host.

use async_trait::async_trait;

use crate::error::WorkerResult;

/// An intercepted request
pub trait FetchRequest {
    fn url(&self) -> String;
}

/// Response type as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response
    Basic,
    Cors,
    Opaque,
    Error,
    Other,
}

/// A response that can be served or stored
pub trait FetchResponse: Sized {
    fn status(&self) -> u16;

    fn kind(&self) -> ResponseKind;

    /// Copy the response so one copy can be stored while the other is served
    fn duplicate(&self) -> WorkerResult<Self>;

    /// Only successful same-origin responses are written through to the cache
    fn is_cacheable(&self) -> bool {
        self.status() == 200 && self.kind() == ResponseKind::Basic
    }
}

/// Execution context of the worker
///
/// Not `Send`: the browser runs a worker on a single thread.
#[async_trait(?Send)]
pub trait WorkerHost {
    type Request: FetchRequest;
    type Response: FetchResponse;

    /// Fetch and store every path in `cache_name`; all or nothing
    async fn precache(&self, cache_name: &str, paths: &[String]) -> WorkerResult<()>;

    /// Names of every existing cache bucket
    async fn cache_names(&self) -> WorkerResult<Vec<String>>;

    /// Delete a bucket, returning whether it existed
    async fn delete_cache(&self, cache_name: &str) -> WorkerResult<bool>;

    /// Look a request up across all buckets
    async fn match_request(&self, request: &Self::Request) -> WorkerResult<Option<Self::Response>>;

    /// Look a path up across all buckets
    async fn match_path(&self, path: &str) -> WorkerResult<Option<Self::Response>>;

    async fn put(&self, cache_name: &str, request: &Self::Request, response: Self::Response) -> WorkerResult<()>;

    async fn fetch(&self, request: &Self::Request) -> WorkerResult<Self::Response>;

    /// Activate without waiting for existing pages to close
    async fn skip_waiting(&self) -> WorkerResult<()>;

    /// Take control of every open page
    async fn claim_clients(&self) -> WorkerResult<()>;
}
