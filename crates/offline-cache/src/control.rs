//! Control Messages
//!
//! One-way channel from the page to the worker. The wire shape is
//! `{ "type": "SKIP_WAITING" }`.

use futures::channel::mpsc;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::error::{WorkerError, WorkerResult};

/// Message posted by a page to its service worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMessage {
    /// Activate immediately instead of waiting for all pages to close
    SkipWaiting,
}

impl ControlMessage {
    /// Decode a posted message; anything unrecognized is `None`
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn to_json(&self) -> serde_json::Value {
        // A fieldless tagged enum always serializes
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Page side of the control queue
#[derive(Debug, Clone)]
pub struct ControlSender(mpsc::UnboundedSender<ControlMessage>);

impl ControlSender {
    pub fn send(&self, message: ControlMessage) -> WorkerResult<()> {
        self.0
            .unbounded_send(message)
            .map_err(|e| WorkerError::Host(format!("control queue closed: {}", e)))
    }
}

/// Worker side of the control queue
#[derive(Debug)]
pub struct ControlReceiver(mpsc::UnboundedReceiver<ControlMessage>);

impl ControlReceiver {
    /// Next message, or `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<ControlMessage> {
        self.0.next().await
    }
}

/// Create the page -> worker control queue
pub fn control_channel() -> (ControlSender, ControlReceiver) {
    let (tx, rx) = mpsc::unbounded();
    (ControlSender(tx), ControlReceiver(rx))
}
