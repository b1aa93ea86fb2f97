//! In-memory transport for coordinator and dispatch tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::protocol::{ApiReply, ApiRequest};
use crate::transport::Transport;

type Scripted = Result<ApiReply, String>;

/// Replies per path: queued replies first, then the path's default, else 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    queued: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    defaults: Mutex<HashMap<&'static str, Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Default reply for every request to `path`.
    pub(crate) fn with_reply(self, path: &'static str, status: u16, body: &str) -> Self {
        self.defaults
            .lock()
            .unwrap()
            .insert(path, Ok(ApiReply::new(status, body)));
        self
    }

    /// Every request to `path` fails at transport level.
    pub(crate) fn with_failure(self, path: &'static str, message: &str) -> Self {
        self.defaults
            .lock()
            .unwrap()
            .insert(path, Err(message.to_string()));
        self
    }

    /// One-shot reply used before the default.
    pub(crate) fn push_reply(&self, path: &'static str, status: u16, body: &str) {
        self.queued
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push_back(Ok(ApiReply::new(status, body)));
    }

    pub(crate) fn push_failure(&self, path: &'static str, message: &str) {
        self.queued
            .lock()
            .unwrap()
            .entry(path)
            .or_default()
            .push_back(Err(message.to_string()));
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub(crate) fn total(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self, path: &str) -> Option<ApiRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        let path = request.path;
        self.requests.lock().unwrap().push(request);

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);
        let scripted = match queued {
            Some(s) => s,
            None => self
                .defaults
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .unwrap_or_else(|| Ok(ApiReply::new(404, ""))),
        };

        scripted.map_err(|message| TransportError::Request {
            url: format!("http://backend.test{}", path),
            message,
        })
    }
}

pub(crate) fn speakers_json(names: &[&str]) -> String {
    let records: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            serde_json::json!({
                "name": name,
                "ip": format!("10.0.0.{}", i + 1),
                "port": 55001,
                "mac": format!("AA:BB:CC:00:00:{:02X}", i + 1),
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}
