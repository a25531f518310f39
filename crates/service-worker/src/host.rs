//! Browser Worker Host
//!
//! `WorkerHost` over the Cache Storage and Fetch APIs of the worker scope.

use async_trait::async_trait;
use js_sys::{Array, Promise};
use offline_cache::{FetchRequest, FetchResponse, ResponseKind, WorkerError, WorkerHost, WorkerResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, CacheStorage, Request, Response, ResponseType, ServiceWorkerGlobalScope};

pub struct SwRequest(pub Request);

impl FetchRequest for SwRequest {
    fn url(&self) -> String {
        self.0.url()
    }
}

pub struct SwResponse(pub Response);

impl FetchResponse for SwResponse {
    fn status(&self) -> u16 {
        self.0.status()
    }

    fn kind(&self) -> ResponseKind {
        response_kind(self.0.type_())
    }

    fn duplicate(&self) -> WorkerResult<Self> {
        self.0
            .clone()
            .map(SwResponse)
            .map_err(|e| WorkerError::Host(js_message(&e)))
    }
}

pub fn response_kind(kind: ResponseType) -> ResponseKind {
    match kind {
        ResponseType::Basic => ResponseKind::Basic,
        ResponseType::Cors => ResponseKind::Cors,
        ResponseType::Opaque | ResponseType::Opaqueredirect => ResponseKind::Opaque,
        ResponseType::Error => ResponseKind::Error,
        _ => ResponseKind::Other,
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

async fn settle(promise: Promise, wrap: fn(String) -> WorkerError) -> WorkerResult<JsValue> {
    JsFuture::from(promise).await.map_err(|e| wrap(js_message(&e)))
}

fn as_response(value: JsValue) -> WorkerResult<Option<SwResponse>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    value
        .dyn_into::<Response>()
        .map(|response| Some(SwResponse(response)))
        .map_err(|e| WorkerError::Cache(js_message(&e)))
}

pub struct BrowserHost {
    scope: ServiceWorkerGlobalScope,
    caches: CacheStorage,
}

impl BrowserHost {
    pub fn from_global() -> Result<Self, JsValue> {
        let scope: ServiceWorkerGlobalScope = js_sys::global().dyn_into()?;
        let caches = scope.caches()?;
        Ok(Self { scope, caches })
    }

    async fn open(&self, cache_name: &str) -> WorkerResult<Cache> {
        settle(self.caches.open(cache_name), WorkerError::Cache)
            .await?
            .dyn_into::<Cache>()
            .map_err(|e| WorkerError::Cache(js_message(&e)))
    }
}

#[async_trait(?Send)]
impl WorkerHost for BrowserHost {
    type Request = SwRequest;
    type Response = SwResponse;

    async fn precache(&self, cache_name: &str, paths: &[String]) -> WorkerResult<()> {
        let cache = self.open(cache_name).await?;
        log::info!("Opened cache {}", cache_name);
        let list: Array = paths.iter().map(|path| JsValue::from_str(path)).collect();
        settle(cache.add_all_with_str_sequence(&list), WorkerError::Network).await?;
        Ok(())
    }

    async fn cache_names(&self) -> WorkerResult<Vec<String>> {
        let keys = settle(self.caches.keys(), WorkerError::Cache).await?;
        Ok(Array::from(&keys).iter().filter_map(|key| key.as_string()).collect())
    }

    async fn delete_cache(&self, cache_name: &str) -> WorkerResult<bool> {
        let deleted = settle(self.caches.delete(cache_name), WorkerError::Cache).await?;
        Ok(deleted.as_bool().unwrap_or(false))
    }

    async fn match_request(&self, request: &SwRequest) -> WorkerResult<Option<SwResponse>> {
        as_response(settle(self.caches.match_with_request(&request.0), WorkerError::Cache).await?)
    }

    async fn match_path(&self, path: &str) -> WorkerResult<Option<SwResponse>> {
        as_response(settle(self.caches.match_with_str(path), WorkerError::Cache).await?)
    }

    async fn put(&self, cache_name: &str, request: &SwRequest, response: SwResponse) -> WorkerResult<()> {
        let cache = self.open(cache_name).await?;
        settle(cache.put_with_request(&request.0, &response.0), WorkerError::Cache).await?;
        Ok(())
    }

    async fn fetch(&self, request: &SwRequest) -> WorkerResult<SwResponse> {
        let value = settle(self.scope.fetch_with_request(&request.0), WorkerError::Network).await?;
        value
            .dyn_into::<Response>()
            .map(SwResponse)
            .map_err(|e| WorkerError::Network(js_message(&e)))
    }

    async fn skip_waiting(&self) -> WorkerResult<()> {
        let promise = self.scope.skip_waiting().map_err(|e| WorkerError::Host(js_message(&e)))?;
        settle(promise, WorkerError::Host).await?;
        Ok(())
    }

    async fn claim_clients(&self) -> WorkerResult<()> {
        settle(self.scope.clients().claim(), WorkerError::Host).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_kind_mapping() {
        assert_eq!(response_kind(ResponseType::Basic), ResponseKind::Basic);
        assert_eq!(response_kind(ResponseType::Cors), ResponseKind::Cors);
        assert_eq!(response_kind(ResponseType::Opaque), ResponseKind::Opaque);
        assert_eq!(response_kind(ResponseType::Opaqueredirect), ResponseKind::Opaque);
        assert_eq!(response_kind(ResponseType::Default), ResponseKind::Other);
    }
}
