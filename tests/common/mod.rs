//! Shared helpers for integration tests: fixtures and an in-memory transport.
#![allow(dead_code)]

use async_trait::async_trait;
use notionapi::{AppError, NotionTransport};
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{}: {}", path, e))
}

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers requests from a queue of canned responses and records every request.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Value, AppError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: AppError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<Method> {
        self.requests().into_iter().map(|r| r.method).collect()
    }
}

#[async_trait]
impl NotionTransport for RecordingTransport {
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, AppError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::InternalError(format!("no response queued for {}", path))))
    }
}
