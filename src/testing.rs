//! In-memory [`Transport`] for unit tests: replays scripted answers in order
//! and records every request it receives.

use crate::client::{Method, Transport};
use crate::error::{HttpError, HttpErrorKind};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value, HttpError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new(responses: Vec<Result<Value, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn status_error(method: Method, path: &str, status: u16) -> HttpError {
        HttpError {
            method,
            path: path.to_string(),
            status: Some(status),
            body: String::new(),
            kind: if status >= 500 {
                HttpErrorKind::ServerError
            } else {
                HttpErrorKind::ClientError
            },
            attempts: 1,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<Method> {
        self.calls().into_iter().map(|c| c.method).collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, HttpError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected {method} {path}: no scripted response left"))
    }
}
