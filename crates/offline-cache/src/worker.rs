//! Offline Worker
//!
//! Lifecycle of one worker generation plus the cache-first fetch strategy.

use std::cell::Cell;

use crate::config::WorkerConfig;
use crate::control::{ControlMessage, ControlReceiver};
use crate::error::{WorkerError, WorkerResult};
use crate::host::{FetchRequest, FetchResponse, WorkerHost};

/// Lifecycle phase of a worker generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerPhase {
    /// Script evaluated, no lifecycle event seen yet
    #[default]
    Parsed,
    /// Precaching the shell
    Installing,
    /// Shell cached, waiting (or skipping the wait) for activation
    Installed,
    /// Evicting stale caches and claiming clients
    Activating,
    /// Serving fetches
    Activated,
    /// Install or activation failed; this generation will not serve
    Redundant,
}

/// Cache-first worker over a host
pub struct OfflineWorker<H: WorkerHost> {
    host: H,
    config: WorkerConfig,
    phase: Cell<WorkerPhase>,
}

impl<H: WorkerHost> OfflineWorker<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, WorkerConfig::default())
    }

    pub fn with_config(host: H, config: WorkerConfig) -> Self {
        Self {
            host,
            config,
            phase: Cell::new(WorkerPhase::Parsed),
        }
    }

    pub fn phase(&self) -> WorkerPhase {
        self.phase.get()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Install event: precache the shell, then take over without waiting.
    ///
    /// A single missing asset fails the whole install and marks this
    /// generation redundant.
    pub async fn install(&self) -> WorkerResult<()> {
        self.phase.set(WorkerPhase::Installing);
        log::info!(
            "Installing {} ({} shell assets)",
            self.config.cache_name,
            self.config.shell_assets.len()
        );

        if let Err(err) = self.host.precache(&self.config.cache_name, &self.config.shell_assets).await {
            log::error!("Precache of {} failed: {}", self.config.cache_name, err);
            self.phase.set(WorkerPhase::Redundant);
            return Err(WorkerError::Install(err.to_string()));
        }

        self.phase.set(WorkerPhase::Installed);
        self.host.skip_waiting().await
    }

    /// Activate event: evict every other cache generation, then claim clients.
    ///
    /// Returns the names of the evicted buckets.
    /// A failure marks this generation redundant.
    pub async fn activate(&self) -> WorkerResult<Vec<String>> {
        self.phase.set(WorkerPhase::Activating);

        match self.evict_and_claim().await {
            Ok(evicted) => {
                self.phase.set(WorkerPhase::Activated);
                Ok(evicted)
            }
            Err(err) => {
                log::error!("Activation of {} failed: {}", self.config.cache_name, err);
                self.phase.set(WorkerPhase::Redundant);
                Err(err)
            }
        }
    }

    async fn evict_and_claim(&self) -> WorkerResult<Vec<String>> {
        let mut evicted = Vec::new();
        for name in self.host.cache_names().await? {
            if name == self.config.cache_name {
                continue;
            }
            log::info!("Deleting old cache: {}", name);
            if self.host.delete_cache(&name).await? {
                evicted.push(name);
            }
        }

        self.host.claim_clients().await?;
        Ok(evicted)
    }

    /// Fetch event: cache, then network, then the cached shell.
    pub async fn handle_fetch(&self, request: &H::Request) -> WorkerResult<H::Response> {
        match self.cache_first(request).await {
            Ok(response) => Ok(response),
            Err(err) => self.fallback(request, err).await,
        }
    }

    async fn cache_first(&self, request: &H::Request) -> WorkerResult<H::Response> {
        if let Some(cached) = self.host.match_request(request).await? {
            return Ok(cached);
        }

        let response = self.host.fetch(request).await?;
        if !response.is_cacheable() {
            return Ok(response);
        }

        // Write-through; a failed store never fails the request itself
        match response.duplicate() {
            Ok(copy) => {
                if let Err(err) = self.host.put(&self.config.cache_name, request, copy).await {
                    log::warn!("Could not cache {}: {}", request.url(), err);
                }
            }
            Err(err) => log::warn!("Could not clone response for {}: {}", request.url(), err),
        }
        Ok(response)
    }

    async fn fallback(&self, request: &H::Request, err: WorkerError) -> WorkerResult<H::Response> {
        let url = request.url();
        if self.config.is_api_request(&url) {
            return Err(err);
        }

        match self.host.match_path(&self.config.fallback_path).await {
            Ok(Some(shell)) => {
                log::debug!("Serving cached shell for {} ({})", url, err);
                Ok(shell)
            }
            Ok(None) => Err(WorkerError::Offline(url)),
            Err(cache_err) => {
                log::warn!("Fallback lookup failed for {}: {}", url, cache_err);
                Err(WorkerError::Offline(url))
            }
        }
    }

    /// Apply one control message from a page
    pub async fn handle_message(&self, message: ControlMessage) -> WorkerResult<()> {
        match message {
            ControlMessage::SkipWaiting => {
                log::info!("Skip waiting requested by page");
                self.host.skip_waiting().await
            }
        }
    }

    /// Drain the control queue until every sender is gone
    pub async fn serve_control(&self, mut receiver: ControlReceiver) {
        while let Some(message) = receiver.recv().await {
            if let Err(err) = self.handle_message(message).await {
                log::warn!("Control message {:?} failed: {}", message, err);
            }
        }
    }
}
