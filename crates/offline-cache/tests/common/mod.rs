//! In-memory worker host
//!
//! Caches are maps keyed by path; the network is a fixed table. Anything not
//! in the table is a network error.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use offline_cache::{FetchRequest, FetchResponse, ResponseKind, WorkerError, WorkerHost, WorkerResult};

#[derive(Debug, Clone, PartialEq)]
pub struct FakeResponse {
    pub url: String,
    pub status: u16,
    pub kind: ResponseKind,
    pub body: String,
}

impl FakeResponse {
    pub fn ok(url: &str, body: &str) -> Self {
        Self {
            url: url.to_string(),
            status: 200,
            kind: ResponseKind::Basic,
            body: body.to_string(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }
}

impl FetchResponse for FakeResponse {
    fn status(&self) -> u16 {
        self.status
    }

    fn kind(&self) -> ResponseKind {
        self.kind
    }

    fn duplicate(&self) -> WorkerResult<Self> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FakeRequest(pub String);

impl FetchRequest for FakeRequest {
    fn url(&self) -> String {
        self.0.clone()
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub caches: RefCell<BTreeMap<String, BTreeMap<String, FakeResponse>>>,
    pub network: RefCell<HashMap<String, FakeResponse>>,
    pub fetch_count: Cell<usize>,
    pub skip_waiting_count: Cell<usize>,
    pub claim_count: Cell<usize>,
    /// `match_request` fails with a cache error
    pub broken_request_lookup: Cell<bool>,
    /// `match_path` fails with a cache error
    pub broken_path_lookup: Cell<bool>,
    /// `claim_clients` fails
    pub broken_claim: Cell<bool>,
}

impl FakeHost {
    /// Host whose network serves the given paths with 200 responses
    pub fn serving(paths: &[&str]) -> Self {
        let host = Self::default();
        for path in paths {
            host.serve(FakeResponse::ok(path, &format!("body of {}", path)));
        }
        host
    }

    pub fn serve(&self, response: FakeResponse) {
        self.network.borrow_mut().insert(response.url.clone(), response);
    }

    pub fn go_offline(&self) {
        self.network.borrow_mut().clear();
    }

    pub fn seed_cache(&self, cache_name: &str, response: FakeResponse) {
        self.caches
            .borrow_mut()
            .entry(cache_name.to_string())
            .or_default()
            .insert(response.url.clone(), response);
    }

    pub fn cached(&self, cache_name: &str, path: &str) -> Option<FakeResponse> {
        self.caches.borrow().get(cache_name).and_then(|cache| cache.get(path).cloned())
    }

    pub fn cache_exists(&self, cache_name: &str) -> bool {
        self.caches.borrow().contains_key(cache_name)
    }

    fn lookup(&self, path: &str) -> Option<FakeResponse> {
        self.caches.borrow().values().find_map(|cache| cache.get(path).cloned())
    }

    fn network_fetch(&self, url: &str) -> WorkerResult<FakeResponse> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        self.network
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| WorkerError::Network(format!("Failed to fetch {}", url)))
    }
}

#[async_trait(?Send)]
impl WorkerHost for FakeHost {
    type Request = FakeRequest;
    type Response = FakeResponse;

    async fn precache(&self, cache_name: &str, paths: &[String]) -> WorkerResult<()> {
        let mut fetched = Vec::new();
        for path in paths {
            let response = self.network_fetch(path)?;
            if response.status != 200 {
                return Err(WorkerError::Network(format!("{} returned {}", path, response.status)));
            }
            fetched.push(response);
        }
        for response in fetched {
            self.seed_cache(cache_name, response);
        }
        Ok(())
    }

    async fn cache_names(&self) -> WorkerResult<Vec<String>> {
        Ok(self.caches.borrow().keys().cloned().collect())
    }

    async fn delete_cache(&self, cache_name: &str) -> WorkerResult<bool> {
        Ok(self.caches.borrow_mut().remove(cache_name).is_some())
    }

    async fn match_request(&self, request: &FakeRequest) -> WorkerResult<Option<FakeResponse>> {
        if self.broken_request_lookup.get() {
            return Err(WorkerError::Cache(format!("match failed for {}", request.0)));
        }
        Ok(self.lookup(&request.0))
    }

    async fn match_path(&self, path: &str) -> WorkerResult<Option<FakeResponse>> {
        if self.broken_path_lookup.get() {
            return Err(WorkerError::Cache(format!("match failed for {}", path)));
        }
        Ok(self.lookup(path))
    }

    async fn put(&self, cache_name: &str, request: &FakeRequest, response: FakeResponse) -> WorkerResult<()> {
        self.caches
            .borrow_mut()
            .entry(cache_name.to_string())
            .or_default()
            .insert(request.0.clone(), response);
        Ok(())
    }

    async fn fetch(&self, request: &FakeRequest) -> WorkerResult<FakeResponse> {
        self.network_fetch(&request.0)
    }

    async fn skip_waiting(&self) -> WorkerResult<()> {
        self.skip_waiting_count.set(self.skip_waiting_count.get() + 1);
        Ok(())
    }

    async fn claim_clients(&self) -> WorkerResult<()> {
        if self.broken_claim.get() {
            return Err(WorkerError::Host("clients.claim rejected".to_string()));
        }
        self.claim_count.set(self.claim_count.get() + 1);
        Ok(())
    }
}
